use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{MAX_PHOTOS_PER_BLOCK, MaterialLine, ServiceBlock};
use crate::totals::{Adjustment, QuoteTotals, compute_totals};

/// Errors raised by draft mutations.
///
/// The totals engine itself has no error conditions; everything that could
/// make a sum ambiguous is rejected here, at the point of entry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("no block at index {0}")]
    BlockIndex(usize),

    #[error("block {block} has no material line at index {line}")]
    LineIndex { block: usize, line: usize },

    #[error("block {block} has no photo at index {photo}")]
    PhotoIndex { block: usize, photo: usize },

    #[error("quantity must be greater than zero, got {0}")]
    InvalidQuantity(Decimal),

    #[error("a block holds at most {MAX_PHOTOS_PER_BLOCK} photos")]
    PhotoLimit,
}

/// The in-progress quote under construction in one editing session.
///
/// Exclusively owned by that session: it is loaded at the start of a command,
/// mutated by exactly one action, and written back. Every mutation goes
/// through a method here so derived totals can never go stale.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuoteDraft {
    #[serde(default)]
    pub client_name: String,

    #[serde(default)]
    pub client_tax_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,

    #[serde(default)]
    pub commercial_terms_text: String,

    #[serde(default)]
    pub footer_notes: String,

    #[serde(default)]
    pub adjustment: Adjustment,

    #[serde(default)]
    pub blocks: Vec<ServiceBlock>,
}

impl QuoteDraft {
    pub fn new() -> Self {
        Self {
            commercial_terms_text: "Pagamento: 50% entrada / 50% entrega.\nValidade: 15 dias."
                .to_string(),
            ..Self::default()
        }
    }

    /// Current totals. Pure; safe to call after every mutation.
    pub fn totals(&self) -> QuoteTotals {
        compute_totals(&self.blocks, &self.adjustment)
    }

    pub fn add_block(
        &mut self,
        title: impl Into<String>,
    ) -> usize {
        self.blocks.push(ServiceBlock::new(title));
        self.blocks.len() - 1
    }

    pub fn remove_block(
        &mut self,
        index: usize,
    ) -> Result<ServiceBlock, DraftError> {
        if index >= self.blocks.len() {
            return Err(DraftError::BlockIndex(index));
        }
        Ok(self.blocks.remove(index))
    }

    pub fn block_mut(
        &mut self,
        index: usize,
    ) -> Result<&mut ServiceBlock, DraftError> {
        self.blocks
            .get_mut(index)
            .ok_or(DraftError::BlockIndex(index))
    }

    /// Adds a material line with price snapshotted from the caller
    /// (typically the catalog price, possibly edited before adding).
    pub fn add_material_line(
        &mut self,
        block: usize,
        material_name: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Result<(), DraftError> {
        if quantity <= Decimal::ZERO {
            return Err(DraftError::InvalidQuantity(quantity));
        }
        self.block_mut(block)?
            .materials
            .push(MaterialLine::new(material_name, quantity, unit_price));
        Ok(())
    }

    pub fn set_line_quantity(
        &mut self,
        block: usize,
        line: usize,
        quantity: Decimal,
    ) -> Result<(), DraftError> {
        if quantity <= Decimal::ZERO {
            return Err(DraftError::InvalidQuantity(quantity));
        }
        self.line_mut(block, line)?.set_quantity(quantity);
        Ok(())
    }

    pub fn set_line_unit_price(
        &mut self,
        block: usize,
        line: usize,
        unit_price: Decimal,
    ) -> Result<(), DraftError> {
        self.line_mut(block, line)?.set_unit_price(unit_price);
        Ok(())
    }

    pub fn remove_line(
        &mut self,
        block: usize,
        line: usize,
    ) -> Result<MaterialLine, DraftError> {
        let b = self.block_mut(block)?;
        if line >= b.materials.len() {
            return Err(DraftError::LineIndex { block, line });
        }
        Ok(b.materials.remove(line))
    }

    pub fn clear_lines(
        &mut self,
        block: usize,
    ) -> Result<(), DraftError> {
        self.block_mut(block)?.materials.clear();
        Ok(())
    }

    pub fn set_labor_cost(
        &mut self,
        block: usize,
        labor_cost: Decimal,
    ) -> Result<(), DraftError> {
        let cost = if labor_cost.is_sign_negative() {
            Decimal::ZERO
        } else {
            labor_cost
        };
        self.block_mut(block)?.labor_cost = cost;
        Ok(())
    }

    pub fn add_photo(
        &mut self,
        block: usize,
        path: PathBuf,
    ) -> Result<(), DraftError> {
        let b = self.block_mut(block)?;
        if b.photos.len() >= MAX_PHOTOS_PER_BLOCK {
            return Err(DraftError::PhotoLimit);
        }
        b.photos.push(path);
        Ok(())
    }

    pub fn remove_photo(
        &mut self,
        block: usize,
        photo: usize,
    ) -> Result<PathBuf, DraftError> {
        let b = self.block_mut(block)?;
        if photo >= b.photos.len() {
            return Err(DraftError::PhotoIndex { block, photo });
        }
        Ok(b.photos.remove(photo))
    }

    fn line_mut(
        &mut self,
        block: usize,
        line: usize,
    ) -> Result<&mut MaterialLine, DraftError> {
        self.block_mut(block)?
            .materials
            .get_mut(line)
            .ok_or(DraftError::LineIndex { block, line })
    }
}
