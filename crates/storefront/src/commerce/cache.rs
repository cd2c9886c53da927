//! Cache types for catalog responses.
//!
//! Catalog reads are the hottest path and change rarely; a short-TTL moka
//! cache in front of the API keeps browsing snappy without a stale-page
//! window longer than a minute.

use super::types::{ApiBrand, ApiCategory, ApiProduct, Paged};

/// Cache key for catalog lookups.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(String),
    Products {
        page: u32,
        limit: u32,
        category: Option<String>,
        brand: Option<String>,
        search: Option<String>,
    },
    Categories,
    Brands,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<ApiProduct>),
    Products(Paged<ApiProduct>),
    Categories(Vec<ApiCategory>),
    Brands(Vec<ApiBrand>),
}
