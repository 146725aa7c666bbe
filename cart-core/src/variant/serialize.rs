//! Wire representation of a variant subtree
//!
//! [`VariantArray`] mirrors the export shape consumed by templates and
//! order persistence. It carries the raw price delta (not the effective
//! unit price) so a subtree can be reconstructed from its export; totals
//! are included read-only.

use super::VariantNode;
use crate::models::TaxClass;
use crate::pricing::PriceCalcMethod;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Export shape of one variant node
///
/// Children serialize as a list of single-entry maps keyed by child id,
/// preserving the historical wire layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantArray {
    pub id: String,
    /// Full parent-qualified SKU
    pub sku: String,
    pub title: String,
    pub price_calc_method: PriceCalcMethod,
    /// Raw price delta of the node
    pub price: Decimal,
    #[serde(rename = "taxClass")]
    pub tax_class: TaxClass,
    pub quantity: u32,
    pub price_total_gross: Decimal,
    pub price_total_net: Decimal,
    pub tax: Decimal,
    #[serde(default)]
    pub additional: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<BTreeMap<String, VariantArray>>>,
}

impl VariantNode {
    /// Export this subtree to its wire representation
    pub fn to_array(&self) -> VariantArray {
        let variants = if self.variants().is_empty() {
            None
        } else {
            Some(
                self.variants()
                    .values()
                    .map(|child| {
                        let mut entry = BTreeMap::new();
                        entry.insert(child.id().to_string(), child.to_array());
                        entry
                    })
                    .collect(),
            )
        };

        VariantArray {
            id: self.id().to_string(),
            sku: self.sku(),
            title: self.title().to_string(),
            price_calc_method: self.price_calc_method(),
            price: self.price(),
            tax_class: self.tax_class().clone(),
            quantity: self.quantity(),
            price_total_gross: self.gross(),
            price_total_net: self.net(),
            tax: self.tax(),
            additional: self.additional_map().clone(),
            variants,
        }
    }
}
