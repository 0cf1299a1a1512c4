//! Quote totals engine.
//!
//! Maps a draft's blocks plus an optional adjustment to the three numbers
//! every proposal prints: subtotal, adjustment value, final total.
//!
//! # Rules
//!
//! | Adjustment      | `adjustment_value`      | `final_total`              |
//! |-----------------|-------------------------|----------------------------|
//! | `None`          | 0                       | subtotal                   |
//! | `Percent(p)`    | subtotal × p / 100      | subtotal + adjustment      |
//! | `Override(f)`   | f − subtotal            | f                          |
//!
//! With an override, the user-facing percent (if one was ever entered) is
//! informational only: the authoritative rule is whatever final number the
//! user confirmed, and the displayed adjustment is the actual delta
//! `final_total − subtotal`.
//!
//! Percentages are clamped to [`ADJUSTMENT_PERCENT_MIN`],
//! [`ADJUSTMENT_PERCENT_MAX`]. The extremes themselves are legal.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use quote_core::models::{MaterialLine, ServiceBlock};
//! use quote_core::totals::{Adjustment, compute_totals};
//!
//! let mut block = ServiceBlock::new("Impermeabilização de Janelas");
//! block.materials.push(MaterialLine::new("Selante Fibrado (Balde)", dec!(2), dec!(950.00)));
//! block.labor_cost = dec!(500.00);
//!
//! let totals = compute_totals(&[block], &Adjustment::percent(dec!(-10)));
//!
//! assert_eq!(totals.subtotal, dec!(2400.00));
//! assert_eq!(totals.adjustment_value, dec!(-240.00));
//! assert_eq!(totals.final_total, dec!(2160.00));
//! assert!(totals.is_discount());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::ServiceBlock;
use crate::totals::common::round_half_up;

/// Lower bound for the margin/discount percentage.
pub const ADJUSTMENT_PERCENT_MIN: Decimal = Decimal::from_parts(50, 0, 0, true, 0);

/// Upper bound for the margin/discount percentage.
pub const ADJUSTMENT_PERCENT_MAX: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// How the computed subtotal is turned into the client-facing final total.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Adjustment {
    /// Final total equals the computed subtotal.
    #[default]
    None,

    /// Percentage margin (positive) or discount (negative) on the subtotal.
    Percent(Decimal),

    /// Manually confirmed final total; overrides any percentage.
    Override(Decimal),
}

impl Adjustment {
    /// Percentage adjustment, clamped to the allowed range.
    pub fn percent(p: Decimal) -> Self {
        Adjustment::Percent(clamp_percent(p))
    }
}

fn clamp_percent(p: Decimal) -> Decimal {
    p.clamp(ADJUSTMENT_PERCENT_MIN, ADJUSTMENT_PERCENT_MAX)
}

/// Result of a totals computation. All values at currency precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTotals {
    /// Exact sum of block totals.
    pub subtotal: Decimal,

    /// Signed delta between final total and subtotal.
    pub adjustment_value: Decimal,

    /// The authoritative client-facing number.
    pub final_total: Decimal,
}

impl QuoteTotals {
    /// True when the proposal should break the subtotal and adjustment out
    /// as separate lines before the final total.
    pub fn has_adjustment(&self) -> bool {
        !self.adjustment_value.is_zero()
    }

    /// A negative adjustment is labeled a discount in the proposal.
    pub fn is_discount(&self) -> bool {
        self.adjustment_value.is_sign_negative() && !self.adjustment_value.is_zero()
    }
}

/// Computes the totals for a set of blocks under the given adjustment.
///
/// Pure; no error conditions. Recompute eagerly after every draft mutation
/// so displayed totals are never stale.
pub fn compute_totals(
    blocks: &[ServiceBlock],
    adjustment: &Adjustment,
) -> QuoteTotals {
    let subtotal = round_half_up(blocks.iter().map(|b| b.block_total()).sum());

    let (adjustment_value, final_total) = match adjustment {
        Adjustment::None => (Decimal::ZERO, subtotal),
        Adjustment::Percent(p) => {
            let value = round_half_up(subtotal * clamp_percent(*p) / Decimal::ONE_HUNDRED);
            (value, round_half_up(subtotal + value))
        }
        Adjustment::Override(f) => {
            let f = round_half_up(*f);
            (round_half_up(f - subtotal), f)
        }
    };

    QuoteTotals {
        subtotal,
        adjustment_value,
        final_total,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::MaterialLine;

    fn sample_blocks() -> Vec<ServiceBlock> {
        let mut first = ServiceBlock::new("Impermeabilização de Janelas");
        first
            .materials
            .push(MaterialLine::new("Selante Fibrado (Balde)", dec!(2), dec!(950.00)));
        first.labor_cost = dec!(500.00);

        let mut second = ServiceBlock::new("Rejuntamento de Fachada");
        second
            .materials
            .push(MaterialLine::new("Rejunte Epóxi", dec!(5), dec!(80.00)));
        second.labor_cost = dec!(1200.00);

        vec![first, second]
    }

    // =========================================================================
    // Subtotal
    // =========================================================================

    #[test]
    fn subtotal_is_sum_of_block_totals() {
        let totals = compute_totals(&sample_blocks(), &Adjustment::None);

        // 2400.00 + 1600.00
        assert_eq!(totals.subtotal, dec!(4000.00));
    }

    #[test]
    fn empty_draft_has_zero_subtotal() {
        let totals = compute_totals(&[], &Adjustment::None);

        assert_eq!(totals.subtotal, dec!(0));
        assert_eq!(totals.final_total, dec!(0));
        assert!(!totals.has_adjustment());
    }

    #[test]
    fn no_adjustment_means_final_equals_subtotal() {
        let totals = compute_totals(&sample_blocks(), &Adjustment::None);

        assert_eq!(totals.final_total, totals.subtotal);
        assert_eq!(totals.adjustment_value, dec!(0));
    }

    // =========================================================================
    // Percentage adjustment
    // =========================================================================

    #[test]
    fn positive_percent_adds_margin() {
        let totals = compute_totals(&sample_blocks(), &Adjustment::percent(dec!(10)));

        assert_eq!(totals.adjustment_value, dec!(400.00));
        assert_eq!(totals.final_total, dec!(4400.00));
        assert!(!totals.is_discount());
    }

    #[test]
    fn negative_percent_is_a_discount() {
        let totals = compute_totals(&sample_blocks(), &Adjustment::percent(dec!(-25)));

        assert_eq!(totals.adjustment_value, dec!(-1000.00));
        assert_eq!(totals.final_total, dec!(3000.00));
        assert!(totals.is_discount());
    }

    #[test]
    fn percent_extremes_are_legal() {
        let low = compute_totals(&sample_blocks(), &Adjustment::percent(dec!(-50)));
        let high = compute_totals(&sample_blocks(), &Adjustment::percent(dec!(50)));

        assert_eq!(low.final_total, dec!(2000.00));
        assert_eq!(high.final_total, dec!(6000.00));
    }

    #[test]
    fn percent_outside_range_is_clamped() {
        let constructed = Adjustment::percent(dec!(-80));
        assert_eq!(constructed, Adjustment::Percent(dec!(-50)));

        // A raw out-of-range value (e.g. from a hand-edited session file)
        // is clamped at computation time as well.
        let totals = compute_totals(&sample_blocks(), &Adjustment::Percent(dec!(200)));
        assert_eq!(totals.final_total, dec!(6000.00));
    }

    #[test]
    fn fractional_percent_rounds_to_currency_precision() {
        let totals = compute_totals(&sample_blocks(), &Adjustment::percent(dec!(3.33)));

        // 4000 * 0.0333 = 133.20
        assert_eq!(totals.adjustment_value, dec!(133.20));
        assert_eq!(totals.final_total, dec!(4133.20));
    }

    // =========================================================================
    // Manual override
    // =========================================================================

    #[test]
    fn override_sets_final_total_exactly() {
        let totals = compute_totals(&sample_blocks(), &Adjustment::Override(dec!(3800.00)));

        assert_eq!(totals.final_total, dec!(3800.00));
    }

    #[test]
    fn override_displays_actual_delta_not_percent() {
        let totals = compute_totals(&sample_blocks(), &Adjustment::Override(dec!(3500.00)));

        assert_eq!(totals.adjustment_value, dec!(-500.00));
        assert!(totals.is_discount());
    }

    #[test]
    fn override_above_subtotal_is_not_a_discount() {
        let totals = compute_totals(&sample_blocks(), &Adjustment::Override(dec!(4500.00)));

        assert_eq!(totals.adjustment_value, dec!(500.00));
        assert!(!totals.is_discount());
    }

    #[test]
    fn override_equal_to_subtotal_shows_no_adjustment() {
        let totals = compute_totals(&sample_blocks(), &Adjustment::Override(dec!(4000.00)));

        assert!(!totals.has_adjustment());
    }
}
