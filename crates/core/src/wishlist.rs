//! Deduplicated saved-products list.
//!
//! Set semantics by product id: adding a product that is already saved is
//! ignored, so the wishlist is idempotent under repeated adds and
//! deterministic given its sequence of operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::ProductSnapshot;
use crate::types::ProductId;

/// One saved product with the time it was saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub product: ProductSnapshot,
    pub added_at: DateTime<Utc>,
}

/// An ordered, deduplicated list of saved products.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    items: Vec<WishlistItem>,
}

impl Wishlist {
    /// Create an empty wishlist.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The saved items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    /// Whether nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of saved products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether a product is saved.
    #[must_use]
    pub fn contains(&self, product: &ProductId) -> bool {
        self.items.iter().any(|i| &i.product.id == product)
    }

    /// Save a product. Returns `false` (and changes nothing) when the
    /// product is already saved.
    pub fn add(&mut self, product: ProductSnapshot, added_at: DateTime<Utc>) -> bool {
        if self.contains(&product.id) {
            return false;
        }
        self.items.push(WishlistItem { product, added_at });
        true
    }

    /// Remove a saved product. Returns `false` when it was not saved.
    pub fn remove(&mut self, product: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| &i.product.id != product);
        self.items.len() != before
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn snapshot(id: &str) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            sku: format!("SKU-{id}"),
            slug: format!("product-{id}"),
            image: None,
        }
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut wishlist = Wishlist::new();
        let now = Utc::now();

        assert!(wishlist.add(snapshot("p1"), now));
        assert!(!wishlist.add(snapshot("p1"), now));
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut wishlist = Wishlist::new();
        let now = Utc::now();
        wishlist.add(snapshot("p1"), now);
        wishlist.add(snapshot("p2"), now);

        assert!(wishlist.remove(&ProductId::new("p1")));
        assert!(!wishlist.remove(&ProductId::new("p1")));
        assert_eq!(wishlist.len(), 1);
        assert!(wishlist.contains(&ProductId::new("p2")));
    }

    #[test]
    fn test_clear() {
        let mut wishlist = Wishlist::new();
        wishlist.add(snapshot("p1"), Utc::now());
        wishlist.clear();
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut wishlist = Wishlist::new();
        let now = Utc::now();
        wishlist.add(snapshot("p2"), now);
        wishlist.add(snapshot("p1"), now);

        let ids: Vec<&str> = wishlist
            .items()
            .iter()
            .map(|i| i.product.id.as_str())
            .collect();
        assert_eq!(ids, vec!["p2", "p1"]);
    }
}
