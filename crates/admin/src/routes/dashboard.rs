//! Dashboard page handler.

use askama::Template;
use axum::{extract::State, response::Html};
use tracing::instrument;

use crate::commerce::types::RecentOrder;
use crate::models::CurrentAdmin;
use crate::{filters, middleware::auth::RequireAdminAuth, state::AppState};

use super::orders::types::{format_order_status, format_price};

/// Admin identity for the page chrome.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub name: String,
    pub email: String,
}

impl From<&CurrentAdmin> for AdminUserView {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            name: admin.name.clone(),
            email: admin.email.clone(),
        }
    }
}

/// Recent order row for the dashboard strip.
#[derive(Debug, Clone)]
pub struct RecentOrderView {
    pub id: String,
    pub order_number: String,
    pub customer_name: String,
    pub status: String,
    pub status_class: String,
    pub total: String,
    pub created_at: String,
}

impl From<&RecentOrder> for RecentOrderView {
    fn from(order: &RecentOrder) -> Self {
        let (status, status_class) = format_order_status(order.status);
        Self {
            id: order.id.to_string(),
            order_number: order.order_number.clone(),
            customer_name: order.customer_name.clone(),
            status,
            status_class,
            total: format_price(order.total),
            created_at: order.created_at.clone(),
        }
    }
}

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard/index.html")]
pub struct DashboardTemplate {
    pub admin_user: AdminUserView,
    pub total_orders: u64,
    pub pending_orders: u64,
    pub processing_orders: u64,
    pub shipped_orders: u64,
    pub delivered_orders: u64,
    pub revenue: String,
    pub low_stock_products: u64,
    pub recent_orders: Vec<RecentOrderView>,
}

/// Dashboard page handler.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Html<String> {
    let summary = match state.commerce().dashboard_summary().await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Failed to fetch dashboard summary: {e}");
            crate::commerce::types::DashboardSummary {
                orders: crate::commerce::types::OrderStats::default(),
                low_stock_products: 0,
                recent_orders: vec![],
            }
        }
    };

    let template = DashboardTemplate {
        admin_user: AdminUserView::from(&admin),
        total_orders: summary.orders.total,
        pending_orders: summary.orders.pending,
        processing_orders: summary.orders.processing,
        shipped_orders: summary.orders.shipped,
        delivered_orders: summary.orders.delivered,
        revenue: format_price(summary.orders.revenue),
        low_stock_products: summary.low_stock_products,
        recent_orders: summary
            .recent_orders
            .iter()
            .map(RecentOrderView::from)
            .collect(),
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}
