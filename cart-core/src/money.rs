//! Money calculation utilities using rust_decimal for precision
//!
//! All tree calculations are done in `Decimal` internally; values are only
//! rounded when converted to `f64` at the storage/serialization boundary.

use crate::error::{CartError, CartResult};
use rust_decimal::prelude::*;
use std::str::FromStr;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation
///
/// If NaN/Infinity reaches here, logs an error and returns ZERO to avoid
/// silent data corruption in financial calculations.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() < MONEY_TOLERANCE
}

/// Parse a price from text, tolerating a comma decimal separator
///
/// Accepts "19.99" and "19,99" alike. Anything that does not parse as a
/// decimal amount after normalization is rejected.
pub fn parse_price(input: &str) -> CartResult<Decimal> {
    let normalized = input.trim().replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| CartError::InvalidPrice {
        input: input.to_string(),
    })
}

/// Price input accepted by variant constructors: text or numeric
#[derive(Debug, Clone, PartialEq)]
pub enum PriceInput {
    /// Already-parsed decimal amount
    Amount(Decimal),
    /// Raw text, parsed with [`parse_price`]
    Text(String),
}

impl PriceInput {
    /// Resolve the input to a decimal amount
    pub fn resolve(self) -> CartResult<Decimal> {
        match self {
            Self::Amount(amount) => Ok(amount),
            Self::Text(text) => parse_price(&text),
        }
    }
}

impl From<Decimal> for PriceInput {
    fn from(value: Decimal) -> Self {
        Self::Amount(value)
    }
}

impl From<f64> for PriceInput {
    fn from(value: f64) -> Self {
        Self::Amount(to_decimal(value))
    }
}

impl From<i64> for PriceInput {
    fn from(value: i64) -> Self {
        Self::Amount(Decimal::from(value))
    }
}

impl From<&str> for PriceInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PriceInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_with_dot() {
        assert_eq!(parse_price("19.99").unwrap(), Decimal::new(1999, 2));
    }

    #[test]
    fn test_parse_price_with_comma() {
        assert_eq!(parse_price("19,99").unwrap(), Decimal::new(1999, 2));
    }

    #[test]
    fn test_parse_price_trims_whitespace() {
        assert_eq!(parse_price(" 5.5 ").unwrap(), Decimal::new(55, 1));
    }

    #[test]
    fn test_parse_price_rejects_garbage() {
        let err = parse_price("abc").unwrap_err();
        assert_eq!(err.code(), "E6106");
    }

    #[test]
    fn test_price_input_conversions() {
        assert_eq!(
            PriceInput::from("7,25").resolve().unwrap(),
            Decimal::new(725, 2)
        );
        assert_eq!(PriceInput::from(10i64).resolve().unwrap(), Decimal::from(10));
        assert_eq!(
            PriceInput::from(2.5f64).resolve().unwrap(),
            Decimal::new(25, 1)
        );
    }

    #[test]
    fn test_to_f64_rounds_half_up() {
        // 38.319327... -> 38.32
        let value = Decimal::from(240) / Decimal::new(119, 2) * Decimal::new(19, 2);
        assert_eq!(to_f64(value), 38.32);
    }

    #[test]
    fn test_money_eq_tolerance() {
        assert!(money_eq(Decimal::new(1000, 2), Decimal::new(10009, 3)));
        assert!(!money_eq(Decimal::new(1000, 2), Decimal::new(1002, 2)));
    }
}
