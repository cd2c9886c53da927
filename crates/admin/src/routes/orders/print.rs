//! Print handlers for order invoices and packing slips.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use serde::Deserialize;
use tracing::instrument;

use crate::{middleware::auth::RequireAdminAuth, state::AppState};

use super::types::{AddressView, LineItemView, format_price};

/// Query params for print action.
#[derive(Debug, Deserialize)]
pub struct PrintQuery {
    /// Type of document: "invoice" or `packing_slip`.
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
}

/// Order view for print templates.
#[derive(Debug, Clone)]
pub struct PrintOrderView {
    pub order_number: String,
    pub created_at: String,
    pub payment_status: String,
    pub payment_method: String,
    pub subtotal: String,
    pub shipping: String,
    pub discount: String,
    pub tax: String,
    pub total: String,
    pub customer_name: String,
    pub shipping_address: AddressView,
    pub billing_address: AddressView,
}

/// Invoice print template.
#[derive(Template)]
#[template(path = "orders/print_invoice.html")]
pub struct OrderInvoiceTemplate {
    pub order: PrintOrderView,
    pub line_items: Vec<LineItemView>,
    pub printed_at: String,
}

/// Packing slip print template.
#[derive(Template)]
#[template(path = "orders/print_packing_slip.html")]
pub struct OrderPackingSlipTemplate {
    pub order: PrintOrderView,
    pub line_items: Vec<LineItemView>,
    pub printed_at: String,
}

/// Print an order invoice or packing slip.
#[instrument(skip(_admin, state), fields(order_id = %id))]
pub async fn print(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PrintQuery>,
) -> impl IntoResponse {
    match state.commerce().get_order(&id).await {
        Ok(Some(order)) => {
            let printed_at = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();

            let print_order = PrintOrderView {
                order_number: order.order_number.clone(),
                created_at: order.created_at.clone(),
                payment_status: order.payment.status.label().to_string(),
                payment_method: order.payment.method.clone(),
                subtotal: format_price(order.subtotal),
                shipping: format_price(order.shipping_cost),
                discount: format_price(order.discount),
                tax: format_price(order.tax),
                total: format_price(order.total),
                customer_name: order.customer.name.clone(),
                shipping_address: AddressView::from(&order.shipping_address),
                billing_address: AddressView::from(&order.billing_address),
            };

            let line_items: Vec<LineItemView> =
                order.items.iter().map(LineItemView::from).collect();

            let doc_type = query.doc_type.as_deref().unwrap_or("invoice");

            if doc_type == "packing_slip" {
                let template = OrderPackingSlipTemplate {
                    order: print_order,
                    line_items,
                    printed_at,
                };
                Html(template.render().unwrap_or_else(|e| {
                    tracing::error!("Template render error: {}", e);
                    "Internal Server Error".to_string()
                }))
                .into_response()
            } else {
                let template = OrderInvoiceTemplate {
                    order: print_order,
                    line_items,
                    printed_at,
                };
                Html(template.render().unwrap_or_else(|e| {
                    tracing::error!("Template render error: {}", e);
                    "Internal Server Error".to_string()
                }))
                .into_response()
            }
        }
        Ok(None) => (StatusCode::NOT_FOUND, "Order not found").into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch order for printing: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch order").into_response()
        }
    }
}
