use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the finalized-quotes ledger.
///
/// Append-only: rows are never edited or deleted through the application
/// surface. The date is a creation-time snapshot, stored as the same
/// `DD/MM/YYYY` string the proposal prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: String,
    pub client_name: String,
    pub total: Decimal,

    #[serde(default)]
    pub contact_link: Option<String>,
}

impl HistoryEntry {
    pub fn new(
        date: NaiveDate,
        client_name: impl Into<String>,
        total: Decimal,
        contact_link: Option<String>,
    ) -> Self {
        Self {
            date: date.format("%d/%m/%Y").to_string(),
            client_name: client_name.into(),
            total,
            contact_link,
        }
    }
}
