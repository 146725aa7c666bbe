//! Cart pricing core
//!
//! Variant tree pricing engine: products carry trees of priced variant
//! nodes; the tree computes per-node quantities, discounts and
//! net/gross/tax totals and keeps them consistent under mutation.
//!
//! All monetary arithmetic is done in [`rust_decimal::Decimal`]; rounding
//! happens only at the export boundary.

pub mod error;
pub mod models;
pub mod money;
pub mod pricing;
pub mod variant;

pub use error::{CartError, CartResult};
pub use models::{Product, TaxClass};
pub use money::{MONEY_TOLERANCE, PriceInput, money_eq, parse_price, to_decimal, to_f64};
pub use pricing::{DiscountHook, DiscountHooks, PriceCalcMethod};
pub use variant::{QuantityUpdate, RemoveSelection, VariantArray, VariantNode};
