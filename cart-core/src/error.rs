//! Error types for the cart pricing engine
//!
//! Every error carries a stable string code in the E61xx range so callers
//! can report failures without matching on the enum shape.

use thiserror::Error;

/// Result type for cart operations
pub type CartResult<T> = Result<T, CartError>;

/// Errors raised by variant construction and tree mutation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    /// A variant needs a product or a parent variant to attach to
    #[error("a variant requires a product or a parent variant anchor")]
    MissingParent,

    /// A variant cannot attach to a product and a parent variant at once
    #[error("a variant cannot be anchored to both a product and a parent variant")]
    AmbiguousParent,

    /// Title must be a non-empty string
    #[error("title must not be empty")]
    EmptyTitle,

    /// SKU must be a non-empty string
    #[error("sku must not be empty")]
    EmptySku,

    /// Quantity must be positive at construction
    #[error("quantity must be positive")]
    InvalidQuantity,

    /// Price could not be parsed as a decimal amount
    #[error("invalid price: {input}")]
    InvalidPrice { input: String },

    /// Price calc method codes range from 0 to 5
    #[error("invalid price calc method code: {code}")]
    InvalidPriceCalcMethod { code: u8 },

    /// Quantity bounds must satisfy min <= max
    #[error("invalid quantity bounds: min {min}, max {max}")]
    InvalidBounds { min: u32, max: u32 },

    /// A referenced child variant does not exist
    #[error("variant not found: {id}")]
    VariantNotFound { id: String },
}

impl CartError {
    /// Get the stable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingParent => "E6101",
            Self::AmbiguousParent => "E6102",
            Self::EmptyTitle => "E6103",
            Self::EmptySku => "E6104",
            Self::InvalidQuantity => "E6105",
            Self::InvalidPrice { .. } => "E6106",
            Self::InvalidPriceCalcMethod { .. } => "E6107",
            Self::InvalidBounds { .. } => "E6108",
            Self::VariantNotFound { .. } => "E6109",
        }
    }
}
