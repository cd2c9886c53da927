//! Order detail page handler.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::{filters, middleware::auth::RequireAdminAuth, state::AppState};

use super::super::dashboard::AdminUserView;
use super::types::{
    OrderDetailView, StatusOptionView, TrackerStepView, allowed_status_options, build_tracker,
};

/// Query parameters for error/success flash display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Order detail page template.
#[derive(Template)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub admin_user: AdminUserView,
    pub order: OrderDetailView,
    /// Display-only 4-step tracker.
    pub tracker: Vec<TrackerStepView>,
    /// Legal next statuses for the dropdown.
    pub status_options: Vec<StatusOptionView>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Order detail page handler.
#[instrument(skip(admin, state), fields(order_id = %id))]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<MessageQuery>,
) -> Response {
    match state.commerce().get_order(&id).await {
        Ok(Some(order)) => {
            let template = OrderShowTemplate {
                admin_user: AdminUserView::from(&admin),
                tracker: build_tracker(order.status),
                status_options: allowed_status_options(order.status),
                order: OrderDetailView::from(&order),
                error: query.error,
                success: query.success,
            };
            Html(template.render().unwrap_or_else(|e| {
                tracing::error!("Template render error: {}", e);
                "Internal Server Error".to_string()
            }))
            .into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, "Order not found").into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch order: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch order").into_response()
        }
    }
}
