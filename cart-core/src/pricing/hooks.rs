//! Discount adjustment hook chain
//!
//! Environment-specific overrides of the pricing tables are injected as an
//! ordered list of hooks at construction time. Each hook may rewrite the
//! numeric inputs and the computed discount by mutable reference; the calc
//! method itself is read-only.

use super::PriceCalcMethod;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;

/// A single discount adjuster
///
/// Runs inside both pricing tables after the table seeds its discount and
/// before the method adjustment step. Hooks run in registration order.
pub trait DiscountHook: Send + Sync {
    fn adjust(
        &self,
        method: PriceCalcMethod,
        price: &mut Decimal,
        base: &mut Decimal,
        discount: &mut Decimal,
    );
}

impl<F> DiscountHook for F
where
    F: Fn(PriceCalcMethod, &mut Decimal, &mut Decimal, &mut Decimal) + Send + Sync,
{
    fn adjust(
        &self,
        method: PriceCalcMethod,
        price: &mut Decimal,
        base: &mut Decimal,
        discount: &mut Decimal,
    ) {
        self(method, price, base, discount)
    }
}

/// Ordered, cheaply clonable hook chain
///
/// An empty chain is the default; children inherit their parent's chain.
#[derive(Clone, Default)]
pub struct DiscountHooks {
    chain: Arc<Vec<Box<dyn DiscountHook>>>,
}

impl DiscountHooks {
    pub fn new(chain: Vec<Box<dyn DiscountHook>>) -> Self {
        Self {
            chain: Arc::new(chain),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Run every hook in registration order
    pub(crate) fn run(
        &self,
        method: PriceCalcMethod,
        price: &mut Decimal,
        base: &mut Decimal,
        discount: &mut Decimal,
    ) {
        for hook in self.chain.iter() {
            hook.adjust(method, price, base, discount);
        }
    }
}

impl fmt::Debug for DiscountHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscountHooks")
            .field("len", &self.chain.len())
            .finish()
    }
}
