//! Storage traits for the two shared flat-file stores.
//!
//! Both stores are whole-file: `save` replaces the entire table and the last
//! full write wins. The traits exist so the CSV backend can later be swapped
//! for row-level persistence without touching business logic.

use thiserror::Error;

use crate::models::{HistoryEntry, MaterialRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store parse error: {0}")]
    Parse(String),

    #[error("backup table is not valid: {0}")]
    InvalidBackup(String),
}

/// Persistent table of purchasable materials/services.
pub trait CatalogStore: Send + Sync {
    /// Returns the full table, creating a small seed table first if no
    /// store exists yet.
    fn load(&self) -> Result<Vec<MaterialRecord>, StoreError>;

    /// Replaces the entire persisted table. Atomic from the caller's
    /// perspective; there are no partial-row merge semantics.
    fn save(
        &self,
        records: &[MaterialRecord],
    ) -> Result<(), StoreError>;

    /// Replaces the table from a backup in the persisted format, validating
    /// it first. On [`StoreError::InvalidBackup`] the store is unchanged.
    fn restore(
        &self,
        backup: &str,
    ) -> Result<usize, StoreError>;
}

/// Append-only ledger of finalized quotes. A flat audit trail for human
/// review, not querying: no dedup, no indexing.
pub trait HistoryLog: Send + Sync {
    /// Returns all rows in append order, or an empty list if no log exists.
    fn load(&self) -> Result<Vec<HistoryEntry>, StoreError>;

    /// Reads the existing log, adds one row, rewrites the whole log.
    fn append(
        &self,
        entry: &HistoryEntry,
    ) -> Result<(), StoreError>;
}
