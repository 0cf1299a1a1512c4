//! Display formatting for money and quantities, Brazilian conventions.

use rust_decimal::Decimal;

use crate::totals::round_half_up;

/// Formats a money value the way the proposal prints it: two decimal
/// places, `,` as the decimal separator, `.` as the thousands separator.
/// The `R$ ` prefix is left to the caller.
pub fn format_brl(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let negative = rounded.is_sign_negative();
    let text = rounded.abs().to_string();

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), format!("{f:0<2}")),
        None => (text, "00".to_string()),
    };

    let mut grouped = String::new();
    for (count, digit) in int_part.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    let grouped: String = grouped.chars().rev().collect();

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped},{frac_part}")
}

/// Formats a quantity for the materials table: integral quantities drop the
/// fraction entirely (`2`, never `2.0`), fractional ones use the `,`
/// decimal separator (`2,5`).
pub fn format_quantity(quantity: Decimal) -> String {
    let normalized = quantity.normalize();
    if normalized.fract().is_zero() {
        normalized.trunc().to_string()
    } else {
        normalized.to_string().replace('.', ",")
    }
}
