//! Shared helpers for money arithmetic.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero, following standard
/// financial conventions.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::totals::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(83.325)), dec!(83.33));
/// assert_eq!(round_half_up(dec!(83.324)), dec!(83.32));
/// assert_eq!(round_half_up(dec!(-83.325)), dec!(-83.33)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
