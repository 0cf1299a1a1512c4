pub mod common;
mod engine;

pub use common::round_half_up;
pub use engine::{
    ADJUSTMENT_PERCENT_MAX, ADJUSTMENT_PERCENT_MIN, Adjustment, QuoteTotals, compute_totals,
};
