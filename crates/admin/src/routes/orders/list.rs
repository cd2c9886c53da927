//! Orders list page handler.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use tracing::instrument;

use crate::{filters, middleware::auth::RequireAdminAuth, state::AppState};

use super::super::dashboard::AdminUserView;
use super::types::{
    OrderTableView, OrdersQuery, build_list_query, build_preserve_params, format_price,
};

/// Orders list page template.
#[derive(Template)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub admin_user: AdminUserView,
    /// Orders to display.
    pub orders: Vec<OrderTableView>,
    /// Current page (1-based).
    pub page: u32,
    /// Total pages for the active filter.
    pub total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
    /// Current search query.
    pub search_value: Option<String>,
    /// Active status filter.
    pub status_filter: Option<String>,
    /// Active payment status filter.
    pub payment_filter: Option<String>,
    /// Parameters to preserve in pagination links.
    pub preserve_params: String,
    /// Summary statistics strip.
    pub stats_total: u64,
    pub stats_pending: u64,
    pub stats_processing: u64,
    pub stats_shipped: u64,
    pub stats_revenue: String,
}

/// Orders list page handler.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Html<String> {
    let list_query = build_list_query(&query);

    let (orders, page, total_pages) = match state.commerce().list_orders(&list_query).await {
        Ok(page) => (
            page.items.iter().map(OrderTableView::from).collect(),
            page.page,
            page.total_pages,
        ),
        Err(e) => {
            tracing::error!("Failed to fetch orders: {e}");
            (vec![], list_query.page, 0)
        }
    };

    // Stats strip degrades to zeroes when the endpoint fails
    let stats = state.commerce().order_stats().await.unwrap_or_default();

    let template = OrdersIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        orders,
        page,
        total_pages,
        has_prev: page > 1,
        has_next: page < total_pages,
        search_value: query.query.clone(),
        status_filter: query.status.clone(),
        payment_filter: query.payment_status.clone(),
        preserve_params: build_preserve_params(&query),
        stats_total: stats.total,
        stats_pending: stats.pending,
        stats_processing: stats.processing,
        stats_shipped: stats.shipped,
        stats_revenue: format_price(stats.revenue),
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}
