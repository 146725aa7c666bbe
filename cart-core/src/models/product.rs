//! Product Model

use super::TaxClass;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity
///
/// The root anchor a variant tree attaches to. The engine reads its base
/// price, net-price flag, SKU and tax class; everything else about products
/// lives outside the pricing core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    pub title: String,
    pub price: Decimal,
    /// Discounted reference price; wins over `price` when lower
    pub special_price: Option<Decimal>,
    /// Whether totals are computed net-first (tax added) or gross-first (tax extracted)
    pub is_net_price: bool,
    pub tax_class: TaxClass,
}

impl Product {
    pub fn new(
        sku: impl Into<String>,
        title: impl Into<String>,
        price: Decimal,
        is_net_price: bool,
        tax_class: TaxClass,
    ) -> Self {
        Self {
            sku: sku.into(),
            title: title.into(),
            price,
            special_price: None,
            is_net_price,
            tax_class,
        }
    }

    pub fn with_special_price(mut self, special_price: Decimal) -> Self {
        self.special_price = Some(special_price);
        self
    }

    /// Best price: the discount-adjusted reference price used as the base
    /// for variant calculations
    pub fn best_price(&self) -> Decimal {
        match self.special_price {
            Some(special) if special < self.price => special,
            _ => self.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tax_class() -> TaxClass {
        TaxClass::new(1, "19 %", Decimal::new(19, 2), "Standard")
    }

    #[test]
    fn test_best_price_without_special() {
        let product = Product::new("P100", "Shirt", Decimal::from(100), false, tax_class());
        assert_eq!(product.best_price(), Decimal::from(100));
    }

    #[test]
    fn test_best_price_with_lower_special() {
        let product = Product::new("P100", "Shirt", Decimal::from(100), false, tax_class())
            .with_special_price(Decimal::from(80));
        assert_eq!(product.best_price(), Decimal::from(80));
    }

    #[test]
    fn test_best_price_ignores_higher_special() {
        let product = Product::new("P100", "Shirt", Decimal::from(100), false, tax_class())
            .with_special_price(Decimal::from(120));
        assert_eq!(product.best_price(), Decimal::from(100));
    }
}
