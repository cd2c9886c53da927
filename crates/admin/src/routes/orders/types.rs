//! Type definitions and conversions for order views.

use rust_decimal::Decimal;
use serde::Deserialize;

use wildfig_core::{CurrencyCode, Money, OrderStatus, PaymentStatus, TrackerStep};

use crate::commerce::types::{Address, Order, OrdersListQuery};

/// Orders per admin list page.
pub const PAGE_SIZE: u32 = 25;

// =============================================================================
// Query Parameters
// =============================================================================

/// Query parameters for the orders list with filtering and pagination.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    /// Page number (1-based).
    pub page: Option<u32>,
    /// Free-text search query.
    pub query: Option<String>,
    /// Order status filter.
    pub status: Option<String>,
    /// Payment status filter.
    pub payment_status: Option<String>,
    /// Created date from (inclusive).
    pub created_from: Option<String>,
    /// Created date to (inclusive).
    pub created_to: Option<String>,
}

/// Build the API list query from URL parameters.
#[must_use]
pub fn build_list_query(query: &OrdersQuery) -> OrdersListQuery {
    OrdersListQuery {
        page: query.page.unwrap_or(1).max(1),
        limit: PAGE_SIZE,
        status: query
            .status
            .as_deref()
            .and_then(|s| s.parse::<OrderStatus>().ok()),
        payment_status: query
            .payment_status
            .as_deref()
            .and_then(|s| match s {
                "pending" => Some(PaymentStatus::Pending),
                "paid" => Some(PaymentStatus::Paid),
                "failed" => Some(PaymentStatus::Failed),
                "refunded" => Some(PaymentStatus::Refunded),
                _ => None,
            }),
        search: query.query.clone().filter(|q| !q.is_empty()),
        date_from: query.created_from.clone().filter(|d| !d.is_empty()),
        date_to: query.created_to.clone().filter(|d| !d.is_empty()),
    }
}

/// Build URL parameters for preserving filters across pagination links.
#[must_use]
pub fn build_preserve_params(query: &OrdersQuery) -> String {
    let mut params = Vec::new();

    if let Some(q) = &query.query
        && !q.is_empty()
    {
        params.push(format!("query={}", urlencoding::encode(q)));
    }
    if let Some(s) = &query.status
        && !s.is_empty()
    {
        params.push(format!("status={s}"));
    }
    if let Some(ps) = &query.payment_status
        && !ps.is_empty()
    {
        params.push(format!("payment_status={ps}"));
    }
    if let Some(from) = &query.created_from
        && !from.is_empty()
    {
        params.push(format!("created_from={from}"));
    }
    if let Some(to) = &query.created_to
        && !to.is_empty()
    {
        params.push(format!("created_to={to}"));
    }

    if params.is_empty() {
        String::new()
    } else {
        format!("&{}", params.join("&"))
    }
}

// =============================================================================
// Formatting Helpers
// =============================================================================

/// Format a decimal amount as a price string.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    Money::new(amount, CurrencyCode::default()).display()
}

/// Format an order status with a semantic badge class.
#[must_use]
pub fn format_order_status(status: OrderStatus) -> (String, String) {
    let class = match status {
        OrderStatus::Delivered => "badge badge-success",
        OrderStatus::Shipped | OrderStatus::Processing => "badge badge-info",
        OrderStatus::Pending => "badge badge-warning",
        OrderStatus::OnHold => "badge badge-destructive",
        OrderStatus::Cancelled | OrderStatus::Refunded => "badge badge-neutral",
    };
    (status.label().to_string(), class.to_string())
}

/// Format a payment status with a semantic badge class.
#[must_use]
pub fn format_payment_status(status: PaymentStatus) -> (String, String) {
    let class = match status {
        PaymentStatus::Paid => "badge badge-success",
        PaymentStatus::Pending => "badge badge-warning",
        PaymentStatus::Failed => "badge badge-destructive",
        PaymentStatus::Refunded => "badge badge-neutral",
    };
    (status.label().to_string(), class.to_string())
}

/// Format destination from a shipping address.
fn format_destination(addr: &Address) -> String {
    if addr.city.is_empty() {
        addr.country.clone()
    } else if addr.country.is_empty() {
        addr.city.clone()
    } else {
        format!("{}, {}", addr.city, addr.country)
    }
}

// =============================================================================
// Table View Types
// =============================================================================

/// Order view for the list table.
#[derive(Debug, Clone)]
pub struct OrderTableView {
    pub id: String,
    pub order_number: String,
    pub created_at: String,
    pub customer_name: String,
    pub customer_email: String,
    pub status: String,
    pub status_class: String,
    pub payment_status: String,
    pub payment_status_class: String,
    pub item_count: u32,
    pub total: String,
    pub destination: String,
}

impl From<&Order> for OrderTableView {
    fn from(order: &Order) -> Self {
        let (status, status_class) = format_order_status(order.status);
        let (payment_status, payment_status_class) = format_payment_status(order.payment.status);

        Self {
            id: order.id.to_string(),
            order_number: order.order_number.clone(),
            created_at: order.created_at.clone(),
            customer_name: order.customer.name.clone(),
            customer_email: order.customer.email.clone(),
            status,
            status_class,
            payment_status,
            payment_status_class,
            item_count: order.items.iter().map(|i| i.quantity).sum(),
            total: format_price(order.total),
            destination: format_destination(&order.shipping_address),
        }
    }
}

// =============================================================================
// Detail View Types
// =============================================================================

/// One step of the rendered 4-step status tracker.
#[derive(Debug, Clone)]
pub struct TrackerStepView {
    pub label: String,
    pub reached: bool,
    pub current: bool,
}

/// Build the display-only tracker projection for a status.
///
/// Empty for cancelled orders; the template shows a banner instead.
#[must_use]
pub fn build_tracker(status: OrderStatus) -> Vec<TrackerStepView> {
    let Some(current) = status.tracker_step() else {
        return Vec::new();
    };

    TrackerStep::ALL
        .iter()
        .map(|step| TrackerStepView {
            label: step.label().to_string(),
            reached: step.position() <= current.position(),
            current: *step == current,
        })
        .collect()
}

/// A status option for the transition dropdown.
#[derive(Debug, Clone)]
pub struct StatusOptionView {
    pub value: String,
    pub label: String,
}

/// The statuses reachable from the current one, for the dropdown.
///
/// Unlike the original unconstrained dropdown, only legal transitions are
/// offered.
#[must_use]
pub fn allowed_status_options(status: OrderStatus) -> Vec<StatusOptionView> {
    status
        .allowed_transitions()
        .iter()
        .map(|s| StatusOptionView {
            value: s.as_str().to_string(),
            label: s.label().to_string(),
        })
        .collect()
}

/// Line item view for the detail and print templates.
#[derive(Debug, Clone)]
pub struct LineItemView {
    pub name: String,
    pub variant_name: Option<String>,
    pub sku: String,
    pub quantity: u32,
    pub unit_price: String,
    pub subtotal: String,
}

impl From<&crate::commerce::types::OrderItem> for LineItemView {
    fn from(item: &crate::commerce::types::OrderItem) -> Self {
        Self {
            name: item.product_name.clone(),
            variant_name: item.variant_name.clone(),
            sku: item.sku.clone(),
            quantity: item.quantity,
            unit_price: format_price(item.unit_price),
            subtotal: format_price(item.subtotal),
        }
    }
}

/// Address view for the detail and print templates.
#[derive(Debug, Clone)]
pub struct AddressView {
    pub lines: Vec<String>,
}

impl From<&Address> for AddressView {
    fn from(addr: &Address) -> Self {
        let mut lines = vec![addr.line1.clone()];
        if let Some(line2) = &addr.line2
            && !line2.is_empty()
        {
            lines.push(line2.clone());
        }
        lines.push(format!("{}, {} {}", addr.city, addr.state, addr.postal_code));
        lines.push(addr.country.clone());
        Self { lines }
    }
}

/// Note view for the detail template.
#[derive(Debug, Clone)]
pub struct NoteView {
    pub text: String,
    pub author: String,
    pub created_at: String,
}

/// Order detail view for templates.
#[derive(Debug, Clone)]
pub struct OrderDetailView {
    pub id: String,
    pub order_number: String,
    pub created_at: String,

    pub status: String,
    pub status_class: String,
    pub status_is_terminal: bool,
    pub is_cancelled: bool,
    pub payment_status: String,
    pub payment_status_class: String,
    pub payment_method: String,
    pub transaction_id: Option<String>,
    pub paid_at: Option<String>,

    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,

    pub carrier: Option<String>,
    pub tracking_number: Option<String>,
    pub shipped_at: Option<String>,
    pub delivered_at: Option<String>,

    pub line_items: Vec<LineItemView>,
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub discount: String,
    pub total: String,

    pub shipping_address: AddressView,
    pub billing_address: AddressView,
    pub notes: Vec<NoteView>,
}

impl From<&Order> for OrderDetailView {
    fn from(order: &Order) -> Self {
        let (status, status_class) = format_order_status(order.status);
        let (payment_status, payment_status_class) = format_payment_status(order.payment.status);

        Self {
            id: order.id.to_string(),
            order_number: order.order_number.clone(),
            created_at: order.created_at.clone(),

            status,
            status_class,
            status_is_terminal: order.status.is_terminal(),
            is_cancelled: order.status == OrderStatus::Cancelled,
            payment_status,
            payment_status_class,
            payment_method: order.payment.method.clone(),
            transaction_id: order.payment.transaction_id.clone(),
            paid_at: order.payment.paid_at.clone(),

            customer_name: order.customer.name.clone(),
            customer_email: order.customer.email.clone(),
            customer_phone: order.customer.phone.clone(),

            carrier: order.shipping.carrier.clone(),
            tracking_number: order.shipping.tracking_number.clone(),
            shipped_at: order.shipping.shipped_at.clone(),
            delivered_at: order.shipping.delivered_at.clone(),

            line_items: order.items.iter().map(LineItemView::from).collect(),
            subtotal: format_price(order.subtotal),
            shipping: format_price(order.shipping_cost),
            tax: format_price(order.tax),
            discount: format_price(order.discount),
            total: format_price(order.total),

            shipping_address: AddressView::from(&order.shipping_address),
            billing_address: AddressView::from(&order.billing_address),
            notes: order
                .notes
                .iter()
                .map(|n| NoteView {
                    text: n.text.clone(),
                    author: n.author.clone().unwrap_or_else(|| "System".to_string()),
                    created_at: n.created_at.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_build_list_query_parses_status() {
        let query = OrdersQuery {
            status: Some("on_hold".to_string()),
            payment_status: Some("paid".to_string()),
            ..OrdersQuery::default()
        };

        let list = build_list_query(&query);
        assert_eq!(list.status, Some(OrderStatus::OnHold));
        assert_eq!(list.payment_status, Some(PaymentStatus::Paid));
        assert_eq!(list.page, 1);
    }

    #[test]
    fn test_build_list_query_ignores_garbage_status() {
        let query = OrdersQuery {
            status: Some("definitely-not-a-status".to_string()),
            ..OrdersQuery::default()
        };

        assert_eq!(build_list_query(&query).status, None);
    }

    #[test]
    fn test_preserve_params_encodes_search() {
        let query = OrdersQuery {
            query: Some("jane doe".to_string()),
            status: Some("pending".to_string()),
            ..OrdersQuery::default()
        };

        let params = build_preserve_params(&query);
        assert!(params.contains("query=jane%20doe"));
        assert!(params.contains("status=pending"));
        assert!(params.starts_with('&'));
    }

    #[test]
    fn test_tracker_positions() {
        let tracker = build_tracker(OrderStatus::Shipped);
        assert_eq!(tracker.len(), 4);
        assert!(tracker[0].reached && !tracker[0].current);
        assert!(tracker[2].reached && tracker[2].current);
        assert!(!tracker[3].reached);

        assert!(build_tracker(OrderStatus::Cancelled).is_empty());
    }

    #[test]
    fn test_allowed_status_options_follow_table() {
        let options = allowed_status_options(OrderStatus::Pending);
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["processing", "on_hold", "cancelled"]);

        assert!(allowed_status_options(OrderStatus::Refunded).is_empty());
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Decimal::new(12345, 2)), "$123.45");
    }
}
