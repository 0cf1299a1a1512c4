pub mod format;
pub mod models;
pub mod store;
pub mod totals;

pub use models::*;
pub use store::{CatalogStore, HistoryLog, StoreError};
pub use totals::{Adjustment, QuoteTotals, compute_totals, round_half_up};
