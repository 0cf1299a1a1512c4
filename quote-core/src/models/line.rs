use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::totals::round_half_up;

/// A material consumed by a service block.
///
/// The name and unit price are copied from the catalog at add time; later
/// catalog edits never reach back into an existing line. `line_total` is
/// derived and is recomputed on every quantity or price edit, so displayed
/// values are never stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialLine {
    pub material_name: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl MaterialLine {
    /// Builds a line with its total already computed.
    /// A negative unit price is defaulted to zero.
    pub fn new(
        material_name: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Self {
        let mut line = Self {
            material_name: material_name.into(),
            quantity,
            unit_price: if unit_price.is_sign_negative() {
                Decimal::ZERO
            } else {
                unit_price
            },
            line_total: Decimal::ZERO,
        };
        line.recompute();
        line
    }

    pub fn set_quantity(
        &mut self,
        quantity: Decimal,
    ) {
        self.quantity = quantity;
        self.recompute();
    }

    pub fn set_unit_price(
        &mut self,
        unit_price: Decimal,
    ) {
        self.unit_price = unit_price;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.line_total = round_half_up(self.quantity * self.unit_price);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn line_total_is_quantity_times_unit_price() {
        let line = MaterialLine::new("Selante Fibrado (Balde)", dec!(2), dec!(950.00));

        assert_eq!(line.line_total, dec!(1900.00));
    }

    #[test]
    fn line_total_tracks_quantity_edits() {
        let mut line = MaterialLine::new("Selante Fibrado (Balde)", dec!(2), dec!(950.00));

        line.set_quantity(dec!(3));

        assert_eq!(line.line_total, dec!(2850.00));
    }

    #[test]
    fn line_total_tracks_unit_price_edits() {
        let mut line = MaterialLine::new("Selante Fibrado (Balde)", dec!(2), dec!(950.00));

        line.set_unit_price(dec!(1000.00));

        assert_eq!(line.line_total, dec!(2000.00));
    }

    #[test]
    fn fractional_quantity_rounds_to_currency_precision() {
        let line = MaterialLine::new("Manta Asfáltica (m²)", dec!(2.5), dec!(33.33));

        assert_eq!(line.line_total, dec!(83.33)); // 83.325 rounds half-up
    }

    #[test]
    fn negative_unit_price_is_defaulted_to_zero() {
        let line = MaterialLine::new("Selante", dec!(2), dec!(-10.00));

        assert_eq!(line.unit_price, Decimal::ZERO);
        assert_eq!(line.line_total, Decimal::ZERO);
    }
}
