//! Variant Pricing Module
//!
//! This module holds the price-combination tables and the discount hook
//! chain. Variants carry a calc method selecting how their own price
//! combines with the parent price (override, fixed or percentage
//! markup/markdown).

mod calculator;
mod hooks;

pub use calculator::*;
pub use hooks::*;
