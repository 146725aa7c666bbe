//! Variant price calculation tables
//!
//! Two tables drive variant pricing: [`discount`] reports the
//! markdown/markup contribution of a variant, [`price_calculated`] produces
//! its effective unit price. The tables assign different method codes to
//! the percentage operations (2/4 vs 3/5); callers depend on either, so the
//! tables are kept separate and must not be merged.
//!
//! Uses rust_decimal for precision calculations.

use super::DiscountHooks;
use crate::error::CartError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a variant's own price combines with its parent's price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PriceCalcMethod {
    /// Keep the parent price, the variant price is ignored
    #[default]
    Base = 0,
    /// The variant price replaces the parent price entirely
    Override = 1,
    /// Fixed-amount markdown
    SubtractAmount = 2,
    /// Percentage markdown
    SubtractPercent = 3,
    /// Fixed-amount markup
    AddAmount = 4,
    /// Percentage markup
    AddPercent = 5,
}

impl From<PriceCalcMethod> for u8 {
    fn from(method: PriceCalcMethod) -> Self {
        method as u8
    }
}

impl TryFrom<u8> for PriceCalcMethod {
    type Error = CartError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Base),
            1 => Ok(Self::Override),
            2 => Ok(Self::SubtractAmount),
            3 => Ok(Self::SubtractPercent),
            4 => Ok(Self::AddAmount),
            5 => Ok(Self::AddPercent),
            code => Err(CartError::InvalidPriceCalcMethod { code }),
        }
    }
}

// ==================== Discount Table ====================

/// Discount contribution of a variant
///
/// Methods 2 and 4 report a percentage of the base; everything else
/// contributes no discount. The hook chain runs after the table and may
/// rewrite any of the numeric values.
pub fn discount(
    method: PriceCalcMethod,
    price: Decimal,
    base: Decimal,
    hooks: &DiscountHooks,
) -> Decimal {
    let mut price = price;
    let mut base = base;

    let mut discount = match method {
        PriceCalcMethod::SubtractAmount => -(price / Decimal::ONE_HUNDRED) * base,
        PriceCalcMethod::AddAmount => (price / Decimal::ONE_HUNDRED) * base,
        _ => Decimal::ZERO,
    };

    hooks.run(method, &mut price, &mut base, &mut discount);

    discount
}

// ==================== Calculated Price Table ====================

/// Effective unit price of a variant
///
/// Steps:
/// 1. Seed the discount: method 3 subtracts, method 5 adds a percentage of
///    the base; other methods seed zero.
/// 2. Run the hook chain (may rewrite price, base and discount).
/// 3. Adjust by method: 1 drops the base, 2 negates the price, 4 keeps both,
///    everything else drops the price.
/// 4. Result = base + price + discount.
pub fn price_calculated(
    method: PriceCalcMethod,
    price: Decimal,
    base: Decimal,
    hooks: &DiscountHooks,
) -> Decimal {
    let mut price = price;
    let mut base = base;

    let mut discount = match method {
        PriceCalcMethod::SubtractPercent => -(price / Decimal::ONE_HUNDRED) * base,
        PriceCalcMethod::AddPercent => (price / Decimal::ONE_HUNDRED) * base,
        _ => Decimal::ZERO,
    };

    hooks.run(method, &mut price, &mut base, &mut discount);

    match method {
        PriceCalcMethod::Override => base = Decimal::ZERO,
        PriceCalcMethod::SubtractAmount => price = -price,
        PriceCalcMethod::AddAmount => {}
        _ => price = Decimal::ZERO,
    }

    base + price + discount
}

// ==================== Tests ====================
