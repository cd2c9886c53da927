//! Bulk action handlers for orders.
//!
//! The list page posts the selected IDs as a comma-separated set. Each
//! order is updated individually; partial failure answers MULTI_STATUS
//! with the per-order errors. "Select all" on the list page selects the
//! loaded page only, not every order matching the filter.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use wildfig_core::OrderStatus;

use crate::{middleware::auth::RequireAdminAuth, state::AppState};

/// Input for bulk status updates.
#[derive(Debug, Deserialize)]
pub struct BulkStatusInput {
    /// Comma-separated list of order IDs.
    pub order_ids: String,
    /// New status (wire form).
    pub status: String,
}

/// Bulk-update order statuses.
///
/// Each order's transition is validated against the table; orders for
/// which the move is illegal are reported, not skipped silently.
#[instrument(skip(_admin, state))]
pub async fn bulk_update_status(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(input): Form<BulkStatusInput>,
) -> impl IntoResponse {
    let order_ids: Vec<&str> = input
        .order_ids
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect();

    if order_ids.is_empty() {
        return (StatusCode::BAD_REQUEST, "No orders specified").into_response();
    }

    let Ok(new_status) = input.status.parse::<OrderStatus>() else {
        return (StatusCode::BAD_REQUEST, "Unknown status").into_response();
    };

    let mut success_count = 0;
    let mut error_messages = Vec::new();

    for id in &order_ids {
        match state.commerce().update_order_status(id, new_status).await {
            Ok(_) => success_count += 1,
            Err(e) => {
                error_messages.push(format!("{id}: {e}"));
            }
        }
    }

    if error_messages.is_empty() {
        tracing::info!(count = success_count, status = %new_status, "Bulk status update completed");
        Redirect::to("/orders").into_response()
    } else {
        tracing::warn!(
            success = success_count,
            errors = ?error_messages,
            "Bulk status update completed with errors"
        );
        (
            StatusCode::MULTI_STATUS,
            format!(
                "Updated {success_count} orders. Errors: {}",
                error_messages.join("; ")
            ),
        )
            .into_response()
    }
}
