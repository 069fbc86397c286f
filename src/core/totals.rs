use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::types::LineItem;

/// Invoice totals derived from line items and rates.
///
/// No rounding is applied here; amounts are rounded to two decimals only
/// when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Σ quantity × unit price.
    pub subtotal: Decimal,
    /// subtotal × VAT rate / 100.
    pub tax: Decimal,
    /// subtotal × withholding rate / 100.
    pub withholding: Decimal,
    /// subtotal + tax − withholding.
    pub total: Decimal,
}

/// Compute invoice totals.
///
/// Tax and withholding are both percentages of the subtotal; withholding is
/// subtracted from (subtotal + tax), it is not compounded.
pub fn calculate_totals(items: &[LineItem], vat_rate: Decimal, withholding_rate: Decimal) -> Totals {
    let subtotal: Decimal = items.iter().map(LineItem::extension).sum();
    let tax = subtotal * vat_rate / dec!(100);
    let withholding = subtotal * withholding_rate / dec!(100);

    Totals {
        subtotal,
        tax,
        withholding,
        total: subtotal + tax - withholding,
    }
}
