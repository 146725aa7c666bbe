//! Variant tree
//!
//! A [`VariantNode`] is a priced modifier attached to a product or to
//! another variant, forming a tree (e.g. color → size → engraving). The
//! tree computes quantities, discounts and net/gross/tax totals, and keeps
//! them consistent under mutation at any depth: every mutator recalculates
//! eagerly before returning, so the total getters are plain cache reads.
//!
//! Ownership flows strictly parent→child through the children map. The
//! parent side is a non-owning snapshot ([`ParentRef`]) of the data a child
//! needs for its own calculation (parent price, SKU prefix); parents keep
//! these snapshots current when their own state changes.

mod serialize;

pub use serialize::VariantArray;

use crate::error::{CartError, CartResult};
use crate::models::{Product, TaxClass};
use crate::money::PriceInput;
use crate::pricing::{self, DiscountHooks, PriceCalcMethod};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;

/// Default separator between SKU path segments
const DEFAULT_SKU_DELIMITER: &str = "-";

/// Non-owning snapshot of the anchor a variant is attached to
///
/// Exactly one of the two shapes exists per node: root variants anchor to a
/// product, nested variants to their parent variant.
#[derive(Debug, Clone, PartialEq)]
enum ParentRef {
    Product {
        price: Decimal,
        best_price: Decimal,
        sku: String,
    },
    Variant {
        price: Decimal,
        sku: String,
    },
}

/// Per-variant quantity update: a direct quantity or nested updates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityUpdate {
    Quantity(u32),
    Variants(BTreeMap<String, QuantityUpdate>),
}

/// Per-variant removal selection: drop the whole subtree or descend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveSelection {
    Subtree,
    Variants(BTreeMap<String, RemoveSelection>),
}

/// A node in the variant tree
#[derive(Debug, Clone)]
pub struct VariantNode {
    id: String,
    parent: ParentRef,
    title: String,
    sku: String,
    sku_delimiter: String,
    price_calc_method: PriceCalcMethod,
    price: Decimal,
    quantity: u32,
    variants: BTreeMap<String, VariantNode>,
    gross: Decimal,
    net: Decimal,
    tax: Decimal,
    is_fe_variant: bool,
    has_fe_variants: bool,
    min: u32,
    max: u32,
    additional: BTreeMap<String, Value>,
    // Inherited from the root product at construction
    is_net_price: bool,
    tax_class: TaxClass,
    hooks: DiscountHooks,
}

impl VariantNode {
    /// Create a variant anchored to a product (root) or a parent variant
    ///
    /// Exactly one anchor must be supplied. A variant anchored to a parent
    /// inherits that parent's hook chain; a product-anchored variant starts
    /// with an empty chain (use [`VariantNode::new_with_hooks`] to inject one).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        product: Option<&Product>,
        parent: Option<&VariantNode>,
        title: impl Into<String>,
        sku: impl Into<String>,
        price_calc_method: PriceCalcMethod,
        price: impl Into<PriceInput>,
        quantity: u32,
    ) -> CartResult<Self> {
        let hooks = parent.map(|p| p.hooks.clone()).unwrap_or_default();
        Self::new_with_hooks(
            id,
            product,
            parent,
            title,
            sku,
            price_calc_method,
            price,
            quantity,
            hooks,
        )
    }

    /// Create a variant with an explicitly injected discount hook chain
    #[allow(clippy::too_many_arguments)]
    pub fn new_with_hooks(
        id: impl Into<String>,
        product: Option<&Product>,
        parent: Option<&VariantNode>,
        title: impl Into<String>,
        sku: impl Into<String>,
        price_calc_method: PriceCalcMethod,
        price: impl Into<PriceInput>,
        quantity: u32,
        hooks: DiscountHooks,
    ) -> CartResult<Self> {
        let (parent_ref, is_net_price, tax_class) = match (product, parent) {
            (None, None) => return Err(CartError::MissingParent),
            (Some(_), Some(_)) => return Err(CartError::AmbiguousParent),
            (Some(product), None) => (
                ParentRef::Product {
                    price: product.price,
                    best_price: product.best_price(),
                    sku: product.sku.clone(),
                },
                product.is_net_price,
                product.tax_class.clone(),
            ),
            (None, Some(parent)) => (
                ParentRef::Variant {
                    price: parent.price,
                    sku: parent.sku(),
                },
                parent.is_net_price,
                parent.tax_class.clone(),
            ),
        };

        let title = title.into();
        if title.is_empty() {
            return Err(CartError::EmptyTitle);
        }
        let sku = sku.into();
        if sku.is_empty() {
            return Err(CartError::EmptySku);
        }
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        let price = price.into().resolve()?;

        let mut node = Self {
            id: id.into(),
            parent: parent_ref,
            title,
            sku,
            sku_delimiter: DEFAULT_SKU_DELIMITER.to_string(),
            price_calc_method,
            price,
            quantity,
            variants: BTreeMap::new(),
            gross: Decimal::ZERO,
            net: Decimal::ZERO,
            tax: Decimal::ZERO,
            is_fe_variant: false,
            has_fe_variants: false,
            min: 0,
            max: 0,
            additional: BTreeMap::new(),
            is_net_price,
            tax_class,
            hooks,
        };
        node.recalc();
        Ok(node)
    }

    // ==================== Accessors ====================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Raw price delta of this node (not the effective unit price)
    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn price_calc_method(&self) -> PriceCalcMethod {
        self.price_calc_method
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Gross total of this subtree
    pub fn gross(&self) -> Decimal {
        self.gross
    }

    /// Net total of this subtree
    pub fn net(&self) -> Decimal {
        self.net
    }

    /// Tax total of this subtree
    pub fn tax(&self) -> Decimal {
        self.tax
    }

    /// Net-price mode inherited from the root product
    pub fn is_net_price(&self) -> bool {
        self.is_net_price
    }

    /// Tax class inherited from the root product
    pub fn tax_class(&self) -> &TaxClass {
        &self.tax_class
    }

    pub fn is_fe_variant(&self) -> bool {
        self.is_fe_variant
    }

    pub fn has_fe_variants(&self) -> bool {
        self.has_fe_variants
    }

    pub fn set_has_fe_variants(&mut self, has_fe_variants: bool) {
        self.has_fe_variants = has_fe_variants;
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn sku_delimiter(&self) -> &str {
        &self.sku_delimiter
    }

    /// Full parent-qualified SKU
    ///
    /// Front-end variants contribute their id to the path, back-end
    /// variants their own SKU segment.
    pub fn sku(&self) -> String {
        let parent_sku = match &self.parent {
            ParentRef::Product { sku, .. } | ParentRef::Variant { sku, .. } => sku,
        };
        let segment = if self.is_fe_variant { &self.id } else { &self.sku };
        format!("{parent_sku}{}{segment}", self.sku_delimiter)
    }

    /// Child variants, keyed by id
    pub fn variants(&self) -> &BTreeMap<String, VariantNode> {
        &self.variants
    }

    /// Look up a direct child by id
    pub fn variant(&self, id: &str) -> Option<&VariantNode> {
        self.variants.get(id)
    }

    pub fn additional(&self, key: &str) -> Option<&Value> {
        self.additional.get(key)
    }

    pub fn additional_map(&self) -> &BTreeMap<String, Value> {
        &self.additional
    }

    pub fn set_additional(&mut self, key: impl Into<String>, value: Value) {
        self.additional.insert(key.into(), value);
    }

    pub fn set_additional_map(&mut self, additional: BTreeMap<String, Value>) {
        self.additional = additional;
    }

    // ==================== Pricing ====================

    /// Base price this node's calc method combines with: the parent
    /// variant's price, or the product's best price at the root
    fn base_price(&self) -> Decimal {
        match &self.parent {
            ParentRef::Variant { price, .. } => *price,
            ParentRef::Product { best_price, .. } => *best_price,
        }
    }

    /// Discount contribution of this node (see [`pricing::discount`])
    pub fn discount(&self) -> Decimal {
        pricing::discount(
            self.price_calc_method,
            self.price,
            self.base_price(),
            &self.hooks,
        )
    }

    /// Effective unit price of this node (see [`pricing::price_calculated`])
    pub fn price_calculated(&self) -> Decimal {
        pricing::price_calculated(
            self.price_calc_method,
            self.price,
            self.base_price(),
            &self.hooks,
        )
    }

    /// Parent price as seen by this node: zero under an override method,
    /// otherwise the parent variant's price or the product's list price
    pub fn parent_price(&self) -> Decimal {
        if self.price_calc_method == PriceCalcMethod::Override {
            return Decimal::ZERO;
        }
        match &self.parent {
            ParentRef::Variant { price, .. } => *price,
            ParentRef::Product { price, .. } => *price,
        }
    }

    // ==================== Setters ====================

    /// Set the raw price and recalculate the subtree
    pub fn set_price(&mut self, price: impl Into<PriceInput>) -> CartResult<()> {
        self.price = price.into().resolve()?;
        self.refresh_children();
        self.recalc();
        Ok(())
    }

    pub fn set_price_calc_method(&mut self, price_calc_method: PriceCalcMethod) {
        self.price_calc_method = price_calc_method;
        self.recalc();
    }

    /// Set the own SKU segment; child SKU prefixes follow
    pub fn set_sku(&mut self, sku: impl Into<String>) -> CartResult<()> {
        let sku = sku.into();
        if sku.is_empty() {
            return Err(CartError::EmptySku);
        }
        self.sku = sku;
        self.refresh_children();
        Ok(())
    }

    pub fn set_sku_delimiter(&mut self, sku_delimiter: impl Into<String>) {
        self.sku_delimiter = sku_delimiter.into();
        self.refresh_children();
    }

    pub fn set_is_fe_variant(&mut self, is_fe_variant: bool) {
        self.is_fe_variant = is_fe_variant;
        self.refresh_children();
    }

    /// Lower quantity bound; must stay below or equal to max
    pub fn set_min(&mut self, min: u32) -> CartResult<()> {
        if min > self.max {
            return Err(CartError::InvalidBounds { min, max: self.max });
        }
        self.min = min;
        Ok(())
    }

    /// Upper quantity bound; must stay above or equal to min
    pub fn set_max(&mut self, max: u32) -> CartResult<()> {
        if max < self.min {
            return Err(CartError::InvalidBounds { min: self.min, max });
        }
        self.max = max;
        Ok(())
    }

    // ==================== Quantity Mutation ====================

    /// Set only the local quantity and recalculate
    ///
    /// A leaf edit: children are untouched. On internal nodes the
    /// recalculation overwrites the value with the children sum again.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.recalc();
    }

    /// Set the quantity here and on every descendant, then recalculate
    ///
    /// The subtree quantity becomes uniform per leaf; internal nodes end up
    /// with the sum of their children.
    pub fn change_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        for child in self.variants.values_mut() {
            child.change_quantity(quantity);
        }
        self.recalc();
    }

    /// Apply per-child quantity updates, recursing into nested maps
    ///
    /// Entries referencing a missing child id are skipped with a warning;
    /// the remaining entries still apply.
    pub fn change_variants_quantity(&mut self, changes: &BTreeMap<String, QuantityUpdate>) {
        for (id, update) in changes {
            match self.variants.get_mut(id) {
                Some(child) => {
                    match update {
                        QuantityUpdate::Quantity(quantity) => child.change_quantity(*quantity),
                        QuantityUpdate::Variants(nested) => {
                            child.change_variants_quantity(nested)
                        }
                    }
                    self.recalc();
                }
                None => {
                    tracing::warn!(
                        variant_id = %id,
                        "quantity change targets a missing variant, skipping"
                    );
                }
            }
        }
    }

    // ==================== Structural Mutation ====================

    /// Add a child variant, merging when the id already exists
    ///
    /// An existing child with children absorbs the new node's children
    /// recursively; an existing leaf sums the quantities. New ids are
    /// inserted directly, rebased onto this node as their parent.
    pub fn add_variant(&mut self, new_variant: VariantNode) {
        let id = new_variant.id.clone();

        if let Some(existing) = self.variants.get_mut(&id) {
            if !existing.variants.is_empty() {
                existing.add_variants(new_variant.variants.into_values());
            } else {
                let quantity = existing.quantity + new_variant.quantity;
                existing.set_quantity(quantity);
            }
        } else {
            let mut new_variant = new_variant;
            self.adopt(&mut new_variant);
            self.variants.insert(id, new_variant);
        }

        self.recalc();
    }

    /// Add several child variants
    pub fn add_variants(&mut self, new_variants: impl IntoIterator<Item = VariantNode>) {
        for variant in new_variants {
            self.add_variant(variant);
        }
    }

    /// Remove child variants per selection
    ///
    /// A missing id aborts with [`CartError::VariantNotFound`]; entries
    /// processed before the miss stay removed. A nested selection recurses
    /// and drops the child entirely once it has no children left.
    pub fn remove_variants(
        &mut self,
        selection: &BTreeMap<String, RemoveSelection>,
    ) -> CartResult<()> {
        for (id, selection) in selection {
            match selection {
                RemoveSelection::Subtree => {
                    if self.variants.remove(id).is_none() {
                        return Err(CartError::VariantNotFound { id: id.clone() });
                    }
                    self.recalc();
                }
                RemoveSelection::Variants(nested) => {
                    let Some(child) = self.variants.get_mut(id) else {
                        return Err(CartError::VariantNotFound { id: id.clone() });
                    };
                    // recalc before propagating: entries the child already
                    // removed stay removed and must be reflected up here
                    let result = child.remove_variants(nested);
                    if child.variants.is_empty() {
                        self.variants.remove(id);
                    }
                    self.recalc();
                    result?;
                }
            }
        }
        Ok(())
    }

    // ==================== Recalculation ====================

    /// Rebase a node (and its subtree) onto this node as its parent
    fn adopt(&mut self, child: &mut VariantNode) {
        child.parent = ParentRef::Variant {
            price: self.price,
            sku: self.sku(),
        };
        child.is_net_price = self.is_net_price;
        child.tax_class = self.tax_class.clone();
        child.hooks = self.hooks.clone();
        child.refresh_children();
    }

    /// Push the current parent snapshot down to all descendants
    fn refresh_children(&mut self) {
        let price = self.price;
        let sku = self.sku();
        let is_net_price = self.is_net_price;
        let tax_class = self.tax_class.clone();
        let hooks = self.hooks.clone();

        for child in self.variants.values_mut() {
            child.parent = ParentRef::Variant {
                price,
                sku: sku.clone(),
            };
            child.is_net_price = is_net_price;
            child.tax_class = tax_class.clone();
            child.hooks = hooks.clone();
            child.refresh_children();
        }
    }

    /// Recalculate this subtree bottom-up
    ///
    /// Children recompute first; an internal node then derives its quantity
    /// from the children sum and runs the mode-appropriate total order:
    /// gross→tax→net in gross mode, net→tax→gross in net mode. Afterward
    /// gross == net + tax holds on every node.
    pub(crate) fn recalc(&mut self) {
        for child in self.variants.values_mut() {
            child.recalc();
        }

        if !self.variants.is_empty() {
            let quantity: u32 = self.variants.values().map(|v| v.quantity).sum();
            if self.quantity != quantity {
                self.quantity = quantity;
            }
        }

        if !self.is_net_price {
            self.calc_gross();
            self.calc_tax();
            self.calc_net();
        } else {
            self.calc_net();
            self.calc_tax();
            self.calc_gross();
        }
    }

    fn calc_gross(&mut self) {
        if !self.is_net_price {
            self.gross = if self.variants.is_empty() {
                self.price_calculated() * Decimal::from(self.quantity)
            } else {
                self.variants.values().map(|v| v.gross).sum()
            };
        } else {
            self.gross = self.net + self.tax;
        }
    }

    fn calc_tax(&mut self) {
        let rate = self.tax_class.calc;
        if !self.is_net_price {
            self.tax = self.gross / (Decimal::ONE + rate) * rate;
        } else {
            self.tax = self.net * rate;
        }
    }

    fn calc_net(&mut self) {
        if self.is_net_price {
            self.net = if self.variants.is_empty() {
                self.price_calculated() * Decimal::from(self.quantity)
            } else {
                self.variants.values().map(|v| v.net).sum()
            };
        } else {
            self.net = self.gross - self.tax;
        }
    }
}
