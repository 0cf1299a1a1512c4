use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::MaterialLine;
use crate::totals::round_half_up;

/// Later variants of the proposal layout fit at most three photos per block.
pub const MAX_PHOTOS_PER_BLOCK: usize = 3;

/// One line-item section of a quote: a titled service with its description,
/// optional damage diagnosis, photo evidence, consumed materials and labor.
///
/// Blocks are session-scoped; they are never persisted on their own, only
/// rendered into a proposal and rolled up into the history total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceBlock {
    pub title: String,

    #[serde(default)]
    pub technical_description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_description: Option<String>,

    /// Paths to photo files, resolved lazily at render time.
    #[serde(default)]
    pub photos: Vec<PathBuf>,

    #[serde(default)]
    pub labor_cost: Decimal,

    #[serde(default)]
    pub materials: Vec<MaterialLine>,
}

impl ServiceBlock {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            technical_description: String::new(),
            damage_description: None,
            photos: Vec::new(),
            materials: Vec::new(),
            labor_cost: Decimal::ZERO,
        }
    }

    /// Sum of all material line totals.
    pub fn materials_subtotal(&self) -> Decimal {
        round_half_up(self.materials.iter().map(|l| l.line_total).sum())
    }

    /// Materials subtotal plus labor.
    pub fn block_total(&self) -> Decimal {
        round_half_up(self.materials_subtotal() + self.labor_cost)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn block_total_is_materials_plus_labor() {
        let mut block = ServiceBlock::new("Impermeabilização de Janelas");
        block
            .materials
            .push(MaterialLine::new("Selante Fibrado (Balde)", dec!(2), dec!(950.00)));
        block.labor_cost = dec!(500.00);

        assert_eq!(block.materials_subtotal(), dec!(1900.00));
        assert_eq!(block.block_total(), dec!(2400.00));
    }

    #[test]
    fn empty_block_totals_zero() {
        let block = ServiceBlock::new("Vistoria");

        assert_eq!(block.materials_subtotal(), dec!(0));
        assert_eq!(block.block_total(), dec!(0));
    }

    #[test]
    fn labor_only_block_totals_labor() {
        let mut block = ServiceBlock::new("Mão de Obra");
        block.labor_cost = dec!(1200.00);

        assert_eq!(block.block_total(), dec!(1200.00));
    }
}
