//! The cart engine: keyed line items with derived totals.
//!
//! Every line stores its identity key ([`LineKey`]) as a first-class field
//! computed once at construction, so two lookups against the same cart can
//! never disagree about which line a product maps to.
//!
//! Totals are a pure function of the lines and a [`PricingPolicy`]; calling
//! [`Cart::totals`] twice in a row always produces the same result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{ProductSnapshot, VariantSnapshot};
use crate::types::{Money, ProductId};

/// Identity of a cart line: the product, plus the variant name when a
/// variant was selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    product: ProductId,
    variant: Option<String>,
}

impl LineKey {
    /// Key for a simple product line.
    #[must_use]
    pub const fn simple(product: ProductId) -> Self {
        Self {
            product,
            variant: None,
        }
    }

    /// Key for a product with a selected variant.
    #[must_use]
    pub fn with_variant(product: ProductId, variant_name: impl Into<String>) -> Self {
        Self {
            product,
            variant: Some(variant_name.into()),
        }
    }

    /// The product component of the key.
    #[must_use]
    pub const fn product(&self) -> &ProductId {
        &self.product
    }

    /// The variant-name component of the key, if any.
    #[must_use]
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }
}

impl std::fmt::Display for LineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.variant {
            Some(v) => write!(f, "{}::{v}", self.product),
            None => write!(f, "{}", self.product),
        }
    }
}

/// One entry in a cart: a product (and optional variant) with quantity
/// and the unit price captured when the line was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Stored identity key; never recomputed after construction.
    pub key: LineKey,
    /// Product snapshot.
    pub product: ProductSnapshot,
    /// Variant snapshot when a variant was selected.
    pub variant: Option<VariantSnapshot>,
    /// Quantity; always at least 1 on a stored line.
    pub quantity: u32,
    /// Unit price at add time.
    pub unit_price: Money,
}

impl CartLine {
    /// Build a line from snapshots, deriving the key from the variant
    /// selection. Quantity is clamped to at least 1.
    #[must_use]
    pub fn new(
        product: ProductSnapshot,
        variant: Option<VariantSnapshot>,
        quantity: u32,
        unit_price: Money,
    ) -> Self {
        let key = match &variant {
            Some(v) => LineKey::with_variant(product.id.clone(), v.name.clone()),
            None => LineKey::simple(product.id.clone()),
        };
        Self {
            key,
            product,
            variant,
            quantity: quantity.max(1),
            unit_price,
        }
    }

    /// Derived line subtotal: unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.unit_price.times(self.quantity)
    }

    /// Display name including the variant, e.g. "Linen Shirt (M - Red)".
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.variant {
            Some(v) => format!("{} ({})", self.product.name, v.name),
            None => self.product.name.clone(),
        }
    }
}

/// The single source of truth for cart-level money rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Tax rate applied to the subtotal (e.g., 0.10 for 10%).
    pub tax_rate: Decimal,
    /// Subtotal at or above which shipping is free.
    pub free_shipping_threshold: Decimal,
    /// Flat shipping fee below the threshold.
    pub flat_shipping_fee: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(10, 2),
            free_shipping_threshold: Decimal::from(100),
            flat_shipping_fee: Decimal::from(10),
        }
    }
}

/// Derived cart-level totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub shipping: Money,
    pub total: Money,
    /// Sum of line quantities.
    pub item_count: u32,
}

impl CartTotals {
    /// Totals of an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            subtotal: Money::zero(),
            tax: Money::zero(),
            shipping: Money::zero(),
            total: Money::zero(),
            item_count: 0,
        }
    }
}

/// An ordered list of cart lines.
///
/// Created empty on first access, mutated by add/set-quantity/remove, and
/// persisted by the caller after every mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of line quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Look up a line by key.
    #[must_use]
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.key == key)
    }

    /// Add a line, merging by key.
    ///
    /// If a line with the same key exists its quantity is increased by the
    /// incoming quantity (keeping the existing snapshots and price);
    /// otherwise the line is appended.
    pub fn add(&mut self, line: CartLine) {
        match self.lines.iter_mut().find(|l| l.key == line.key) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            }
            None => self.lines.push(line),
        }
    }

    /// Overwrite the quantity of a line.
    ///
    /// A quantity of 0 removes the line. Setting the quantity of an absent
    /// key is a no-op.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: u32) {
        if quantity == 0 {
            self.remove(key);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| &l.key == key) {
            line.quantity = quantity;
        }
    }

    /// Remove a line by key. Removing an absent key leaves the cart
    /// unchanged.
    pub fn remove(&mut self, key: &LineKey) {
        self.lines.retain(|l| &l.key != key);
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Compute cart-level totals under the given policy.
    ///
    /// Pure: does not mutate the cart, and repeated calls return the same
    /// result. An empty cart has all-zero totals (no shipping fee on
    /// nothing).
    #[must_use]
    pub fn totals(&self, policy: &PricingPolicy) -> CartTotals {
        if self.lines.is_empty() {
            return CartTotals::empty();
        }

        let subtotal = self
            .lines
            .iter()
            .fold(Money::zero(), |acc, line| acc.plus(&line.subtotal()));

        let tax = Money::new(subtotal.amount * policy.tax_rate, subtotal.currency).rounded();

        let shipping = if subtotal.amount >= policy.free_shipping_threshold {
            Money::new(Decimal::ZERO, subtotal.currency)
        } else {
            Money::new(policy.flat_shipping_fee, subtotal.currency)
        };

        let total = subtotal.plus(&tax).plus(&shipping);

        CartTotals {
            subtotal,
            tax,
            shipping,
            total,
            item_count: self.item_count(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn snapshot(id: &str, name: &str) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(id),
            name: name.to_owned(),
            sku: format!("SKU-{id}"),
            slug: name.to_lowercase().replace(' ', "-"),
            image: None,
        }
    }

    fn variant(name: &str, price: Money) -> VariantSnapshot {
        VariantSnapshot {
            name: name.to_owned(),
            sku: format!("SKU-{name}"),
            price,
            attributes: std::collections::BTreeMap::new(),
        }
    }

    #[test]
    fn test_add_same_product_merges_quantities() {
        let mut cart = Cart::new();
        cart.add(CartLine::new(
            snapshot("p1", "Linen Shirt"),
            None,
            1,
            Money::from_major(40),
        ));
        cart.add(CartLine::new(
            snapshot("p1", "Linen Shirt"),
            None,
            2,
            Money::from_major(40),
        ));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn test_different_variants_stay_separate_lines() {
        let mut cart = Cart::new();
        let price = Money::from_major(40);
        cart.add(CartLine::new(
            snapshot("p1", "Linen Shirt"),
            Some(variant("M - Red", price)),
            1,
            price,
        ));
        cart.add(CartLine::new(
            snapshot("p1", "Linen Shirt"),
            Some(variant("M - Blue", price)),
            1,
            price,
        ));

        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_remove_nonexistent_is_noop() {
        let mut cart = Cart::new();
        cart.add(CartLine::new(
            snapshot("p1", "Linen Shirt"),
            None,
            1,
            Money::from_major(40),
        ));

        let before = cart.clone();
        cart.remove(&LineKey::simple(ProductId::new("missing")));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(CartLine::new(
            snapshot("p1", "Linen Shirt"),
            None,
            2,
            Money::from_major(40),
        ));

        let key = LineKey::simple(ProductId::new("p1"));
        cart.set_quantity(&key, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_above_free_shipping_threshold() {
        let mut cart = Cart::new();
        cart.add(CartLine::new(
            snapshot("p1", "Wool Coat"),
            None,
            2,
            Money::from_major(100),
        ));

        let totals = cart.totals(&PricingPolicy::default());
        assert_eq!(totals.subtotal, Money::from_major(200));
        assert_eq!(totals.tax, Money::from_major(20));
        assert!(totals.shipping.is_zero());
        assert_eq!(totals.total, Money::from_major(220));
        assert_eq!(totals.item_count, 2);
    }

    #[test]
    fn test_totals_below_threshold_charges_flat_fee() {
        let mut cart = Cart::new();
        cart.add(CartLine::new(
            snapshot("p1", "Socks"),
            None,
            1,
            Money::from_major(20),
        ));

        let totals = cart.totals(&PricingPolicy::default());
        assert_eq!(totals.shipping, Money::from_major(10));
        // 20 + 2 tax + 10 shipping
        assert_eq!(totals.total, Money::from_major(32));
    }

    #[test]
    fn test_totals_idempotent() {
        let mut cart = Cart::new();
        cart.add(CartLine::new(
            snapshot("p1", "Socks"),
            None,
            3,
            Money::from_cents(1250),
        ));

        let policy = PricingPolicy::default();
        assert_eq!(cart.totals(&policy), cart.totals(&policy));
    }

    #[test]
    fn test_empty_cart_has_zero_totals() {
        let totals = Cart::new().totals(&PricingPolicy::default());
        assert!(totals.subtotal.is_zero());
        assert!(totals.shipping.is_zero());
        assert!(totals.total.is_zero());
    }

    #[test]
    fn test_clear_after_checkout() {
        let mut cart = Cart::new();
        cart.add(CartLine::new(
            snapshot("p1", "Socks"),
            None,
            1,
            Money::from_major(20),
        ));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }
}
