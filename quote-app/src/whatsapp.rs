//! WhatsApp handoff link.
//!
//! The application never sends anything; it only prepares a `wa.me` deep
//! link with a prefilled summary the user can fire from their own phone.

use quote_core::format::format_brl;
use rust_decimal::Decimal;

/// Builds the prefilled deep link, or `None` when the contact number has no
/// digits to dial. Numbers without a country code get the Brazilian `55`.
pub fn build_link(
    contact_number: &str,
    client_name: &str,
    final_total: Decimal,
) -> Option<String> {
    let digits: String = contact_number
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    // Local numbers are at most 11 digits (DDD + 9-digit mobile).
    let digits = if digits.len() <= 11 {
        format!("55{digits}")
    } else {
        digits
    };

    let message = format!(
        "Olá! Segue o orçamento para {client_name}. Valor total: R$ {}.",
        format_brl(final_total)
    );
    Some(format!(
        "https://wa.me/{digits}?text={}",
        urlencoding::encode(&message)
    ))
}
