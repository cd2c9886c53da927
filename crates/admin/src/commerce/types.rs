//! Wire types for the backoffice surface of the commerce REST API.
//!
//! Separate from the storefront's types on purpose: the backoffice sees
//! richer projections (notes, payment transactions, stats) and sends
//! write payloads the storefront never does.

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

/// Successful interactive login: user plus token pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: ApiUser,
    pub access_token: String,
    pub refresh_token: String,
}

/// Service-key exchange response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTokenResponse {
    pub access_token: String,
}

// =============================================================================
// Orders
// =============================================================================

/// Customer block on an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Postal address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
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
pub struct PaymentInfo {
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
pub struct ShippingInfo {
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
pub struct OrderItem {
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

/// A note left on an order by an admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderNote {
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
    pub created_at: String,
}

/// An order as the backoffice API projects it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub customer: Customer,
    pub items: Vec<OrderItem>,
    pub shipping_address: Address,
    pub billing_address: Address,
    pub payment: PaymentInfo,
    #[serde(default)]
    pub shipping: ShippingInfo,
    pub status: OrderStatus,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub tax: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    pub total: Decimal,
    #[serde(default)]
    pub notes: Vec<OrderNote>,
    pub created_at: String,
    pub updated_at: String,
}

/// Status-count summary for the orders list header and the dashboard.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub processing: u64,
    #[serde(default)]
    pub shipped: u64,
    #[serde(default)]
    pub delivered: u64,
    #[serde(default)]
    pub cancelled: u64,
    #[serde(default)]
    pub revenue: Decimal,
}

/// Order list query (server-side filtering and paging).
#[derive(Debug, Clone, Default)]
pub struct OrdersListQuery {
    pub page: u32,
    pub limit: u32,
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub search: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// Shipping update payload (carrier / tracking number).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingUpdate {
    pub carrier: Option<String>,
    pub tracking_number: Option<String>,
}

// =============================================================================
// Catalog (admin projections and write payloads)
// =============================================================================

/// A product image; exactly one per product is flagged primary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// SEO sub-object on a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
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
pub struct Variant {
    #[serde(default)]
    pub id: Option<VariantId>,
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub stock: i64,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// A product as the backoffice API returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
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
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub brand_id: Option<BrandId>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub seo: Option<Seo>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

const fn default_low_stock_threshold() -> i64 {
    5
}

const fn default_true() -> bool {
    true
}

/// Create/update payload for a product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub slug: String,
    pub sku: String,
    pub description: Option<String>,
    pub product_type: ProductType,
    pub price: Decimal,
    pub compare_at_price: Option<Decimal>,
    pub stock: i64,
    pub low_stock_threshold: i64,
    pub category_id: Option<CategoryId>,
    pub brand_id: Option<BrandId>,
    pub variants: Vec<Variant>,
    pub images: Vec<Image>,
    pub seo: Option<Seo>,
    pub is_active: bool,
}

/// A category record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
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

/// Create/update payload for a category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub parent: Option<ParentCategory>,
    pub is_active: bool,
}

/// A brand record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Create/update payload for a brand.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandInput {
    pub name: String,
    pub slug: String,
    pub logo: Option<String>,
    pub is_active: bool,
}

// =============================================================================
// Analytics
// =============================================================================

/// Row of the dashboard's recent-orders strip.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrder {
    pub id: OrderId,
    pub order_number: String,
    pub customer_name: String,
    pub status: OrderStatus,
    pub total: Decimal,
    pub created_at: String,
}

/// Dashboard summary from `/api/analytics/dashboard`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub orders: OrderStats,
    #[serde(default)]
    pub low_stock_products: u64,
    #[serde(default)]
    pub recent_orders: Vec<RecentOrder>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_deserializes_with_defaults() {
        let json = r##"{
            "id": "o1", "orderNumber": "#1001",
            "customer": { "name": "Ada", "email": "ada@example.com" },
            "items": [],
            "shippingAddress": { "line1": "1 Fig Ln", "city": "Portland",
                                 "state": "OR", "postalCode": "97201", "country": "US" },
            "billingAddress": { "line1": "1 Fig Ln", "city": "Portland",
                                "state": "OR", "postalCode": "97201", "country": "US" },
            "payment": { "method": "card", "status": "paid" },
            "status": "on_hold",
            "subtotal": "100.00", "shippingCost": "0.00", "tax": "10.00",
            "total": "110.00",
            "createdAt": "2026-07-01T10:00:00Z", "updatedAt": "2026-07-01T10:00:00Z"
        }"##;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::OnHold);
        assert_eq!(order.payment.status, PaymentStatus::Paid);
        assert!(order.notes.is_empty());
        assert!(order.shipping.tracking_number.is_none());
    }

    #[test]
    fn test_product_input_serializes_camel_case() {
        let input = ProductInput {
            name: "Tee".to_owned(),
            slug: "tee".to_owned(),
            sku: "TEE".to_owned(),
            description: None,
            product_type: ProductType::Simple,
            price: Decimal::from(20),
            compare_at_price: None,
            stock: 10,
            low_stock_threshold: 5,
            category_id: None,
            brand_id: None,
            variants: vec![],
            images: vec![],
            seo: None,
            is_active: true,
        };

        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains("\"productType\":\"simple\""));
        assert!(json.contains("\"lowStockThreshold\":5"));
    }
}
