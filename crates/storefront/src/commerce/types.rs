//! Wire types for the commerce REST API.
//!
//! Every response body is wrapped in the `CommonResponse` envelope; JSON
//! field names are camelCase on the wire.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use wildfig_core::{
    BrandId, CategoryId, OrderId, OrderStatus, ParentCategory, PaymentStatus, ProductId,
    ProductType, UserId, UserRole, VariantId,
};

/// Standard response envelope: `{ success, data, message }`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommonResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

/// Page of results with the API's paging shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl<T> Paged<T> {
    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A product image; exactly one per product is flagged primary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiImage {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// SEO sub-object on a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSeo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A purchasable variant configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVariant {
    #[serde(default)]
    pub id: Option<VariantId>,
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub stock: i64,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// Reference to a category on a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

/// Reference to a brand on a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandRef {
    pub id: BrandId,
    pub name: String,
    pub slug: String,
}

/// A catalog product as the storefront API returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiProduct {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub sku: String,
    #[serde(default)]
    pub description: Option<String>,
    pub product_type: ProductType,
    pub price: Decimal,
    #[serde(default)]
    pub compare_at_price: Option<Decimal>,
    pub stock: i64,
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub brand: Option<BrandRef>,
    #[serde(default)]
    pub variants: Vec<ApiVariant>,
    #[serde(default)]
    pub images: Vec<ApiImage>,
    #[serde(default)]
    pub seo: Option<ApiSeo>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

const fn default_low_stock_threshold() -> i64 {
    5
}

const fn default_true() -> bool {
    true
}

impl ApiProduct {
    /// URL of the image flagged primary, falling back to the first image.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .iter()
            .find(|i| i.is_primary)
            .or_else(|| self.images.first())
            .map(|i| i.url.as_str())
    }

    /// Find a variant by its derived name.
    #[must_use]
    pub fn variant_by_name(&self, name: &str) -> Option<&ApiVariant> {
        self.variants.iter().find(|v| v.name == name)
    }
}

/// A category record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCategory {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Classification label (men/women/children), not a graph edge.
    #[serde(default)]
    pub parent: Option<ParentCategory>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// A brand record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBrand {
    pub id: BrandId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

// =============================================================================
// Auth
// =============================================================================

/// User record returned by the auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

/// Successful auth response: the user plus a token pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: ApiUser,
    pub access_token: String,
    pub refresh_token: String,
}

// =============================================================================
// Orders
// =============================================================================

/// Customer block on an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCustomer {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Postal address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAddress {
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// Payment block on an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPaymentInfo {
    pub method: String,
    pub status: PaymentStatus,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub paid_at: Option<String>,
}

/// Shipping block on an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiShippingInfo {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub shipped_at: Option<String>,
    #[serde(default)]
    pub delivered_at: Option<String>,
}

/// One ordered line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(default)]
    pub variant_name: Option<String>,
    pub sku: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// An order as the API projects it to customers.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOrder {
    pub id: OrderId,
    pub order_number: String,
    pub customer: ApiCustomer,
    pub items: Vec<ApiOrderItem>,
    pub shipping_address: ApiAddress,
    pub billing_address: ApiAddress,
    pub payment: ApiPaymentInfo,
    #[serde(default)]
    pub shipping: ApiShippingInfo,
    pub status: OrderStatus,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub tax: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    pub total: Decimal,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload for placing an order at checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    pub customer: ApiCustomer,
    pub items: Vec<ApiOrderItem>,
    pub shipping_address: ApiAddress,
    pub billing_address: ApiAddress,
    pub payment_method: String,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

// =============================================================================
// Queries
// =============================================================================

/// Catalog listing query.
#[derive(Debug, Clone, Default)]
pub struct ProductsQuery {
    pub page: u32,
    pub limit: u32,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub search: Option<String>,
}

impl ProductsQuery {
    /// First page with the given page size.
    #[must_use]
    pub fn first_page(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_deserializes_camel_case() {
        let json = r#"{
            "success": true,
            "data": { "items": [], "page": 1, "limit": 12, "total": 0, "totalPages": 0 },
            "message": null
        }"#;

        let resp: CommonResponse<Paged<ApiProduct>> = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap().total_pages, 0);
    }

    #[test]
    fn test_primary_image_fallback() {
        let json = r#"{
            "id": "p1", "name": "Shirt", "slug": "shirt", "sku": "SH-1",
            "productType": "simple", "price": "29.00", "stock": 3,
            "images": [
                { "url": "a.jpg" },
                { "url": "b.jpg", "isPrimary": true }
            ]
        }"#;

        let product: ApiProduct = serde_json::from_str(json).unwrap();
        assert_eq!(product.primary_image(), Some("b.jpg"));
        assert_eq!(product.low_stock_threshold, 5);
        assert!(product.is_active);
    }

    #[test]
    fn test_paged_has_next_page() {
        let page: Paged<ApiBrand> = Paged {
            items: vec![],
            page: 2,
            limit: 12,
            total: 30,
            total_pages: 3,
        };
        assert!(page.has_next_page());
    }
}
