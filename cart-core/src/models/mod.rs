//! Value models the pricing engine collaborates with

mod product;
mod tax_class;

pub use product::Product;
pub use tax_class::TaxClass;
