//! Owned catalog snapshots.
//!
//! Carts, wishlists, and order lines carry a snapshot of the product as it
//! was when added, not a live reference: catalog edits must not silently
//! reprice or rename an item already in a cart.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Money, ProductId};

/// Snapshot of a product at the moment it entered a cart or wishlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Commerce API product ID.
    pub id: ProductId,
    /// Product name at snapshot time.
    pub name: String,
    /// Base SKU.
    pub sku: String,
    /// URL slug for linking back to the product page.
    pub slug: String,
    /// Primary image URL, if the product had one.
    pub image: Option<String>,
}

/// Snapshot of a selected variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSnapshot {
    /// Derived variant name (e.g., "M - Red").
    pub name: String,
    /// Variant SKU.
    pub sku: String,
    /// Variant price at snapshot time.
    pub price: Money,
    /// Option attributes (e.g., Size -> M, Color -> Red).
    pub attributes: BTreeMap<String, String>,
}
