//! Tax Class Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tax class entity
///
/// Supplies the tax rate used in net/gross conversion. `calc` is the rate
/// as a fraction (0.19 = 19 %). Callers must keep `calc` above -1; the
/// engine divides by `1 + calc` in gross mode and does not re-validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxClass {
    pub id: i64,
    /// Display label (e.g. "19 %")
    pub value: String,
    /// Tax rate as a fraction (e.g. 0.19)
    pub calc: Decimal,
    pub title: String,
}

impl TaxClass {
    pub fn new(
        id: i64,
        value: impl Into<String>,
        calc: Decimal,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id,
            value: value.into(),
            calc,
            title: title.into(),
        }
    }
}
