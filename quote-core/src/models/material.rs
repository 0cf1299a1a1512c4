use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the materials catalog.
///
/// `name` is treated as unique by convention only; the store performs no
/// duplicate check and the last full write wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub name: String,

    /// Older catalog files may lack this column entirely.
    #[serde(default)]
    pub description: String,

    pub unit_price: Decimal,
}

impl MaterialRecord {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        unit_price: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            unit_price,
        }
    }
}
