//! Single order action handlers: status changes, shipping updates, notes.

use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use wildfig_core::OrderStatus;

use crate::commerce::BackofficeError;
use crate::commerce::types::ShippingUpdate;
use crate::{middleware::auth::RequireAdminAuth, state::AppState};

// =============================================================================
// Input Types
// =============================================================================

/// Input for a status change.
#[derive(Debug, Deserialize)]
pub struct StatusInput {
    /// New status (wire form, e.g. "processing").
    pub status: String,
}

/// Input for a shipping info update.
#[derive(Debug, Deserialize)]
pub struct ShippingInput {
    pub carrier: Option<String>,
    pub tracking_number: Option<String>,
}

/// Input for appending a note.
#[derive(Debug, Deserialize)]
pub struct NoteInput {
    pub text: String,
}

fn detail_url(id: &str) -> String {
    format!("/orders/{id}")
}

fn detail_error(id: &str, message: &str) -> String {
    format!("/orders/{id}?error={}", urlencoding::encode(message))
}

fn detail_success(id: &str, message: &str) -> String {
    format!("/orders/{id}?success={}", urlencoding::encode(message))
}

// =============================================================================
// Handlers
// =============================================================================

/// Change an order's status.
///
/// The client validates the move against the transition table before the
/// PUT goes out; an illegal transition surfaces as a flash message, not an
/// API call.
#[instrument(skip(_admin, state), fields(order_id = %id))]
pub async fn update_status(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<StatusInput>,
) -> impl IntoResponse {
    let Ok(new_status) = input.status.parse::<OrderStatus>() else {
        return Redirect::to(&detail_error(&id, "Unknown status"));
    };

    match state.commerce().update_order_status(&id, new_status).await {
        Ok(order) => {
            tracing::info!(status = %order.status, "order status updated");
            Redirect::to(&detail_success(
                &id,
                &format!("Order moved to {}", new_status.label()),
            ))
        }
        Err(BackofficeError::IllegalTransition { from, to }) => {
            tracing::warn!(%from, %to, "illegal status transition rejected");
            Redirect::to(&detail_error(
                &id,
                &format!("Cannot move an order from {from} to {to}"),
            ))
        }
        Err(e) => {
            tracing::error!("Failed to update order status: {e}");
            Redirect::to(&detail_error(&id, "Status update failed"))
        }
    }
}

/// Update an order's carrier / tracking number.
#[instrument(skip(_admin, state), fields(order_id = %id))]
pub async fn update_shipping(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<ShippingInput>,
) -> impl IntoResponse {
    let update = ShippingUpdate {
        carrier: input.carrier.filter(|c| !c.is_empty()),
        tracking_number: input.tracking_number.filter(|t| !t.is_empty()),
    };

    match state.commerce().update_shipping(&id, &update).await {
        Ok(_) => Redirect::to(&detail_success(&id, "Shipping info updated")),
        Err(e) => {
            tracing::error!("Failed to update shipping info: {e}");
            Redirect::to(&detail_error(&id, "Shipping update failed"))
        }
    }
}

/// Append an admin note to an order.
#[instrument(skip(admin, state, input), fields(order_id = %id))]
pub async fn add_note(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<NoteInput>,
) -> impl IntoResponse {
    let text = input.text.trim();
    if text.is_empty() {
        return Redirect::to(&detail_url(&id));
    }

    match state.commerce().add_order_note(&id, text, &admin.name).await {
        Ok(_) => Redirect::to(&detail_url(&id)),
        Err(e) => {
            tracing::error!("Failed to add order note: {e}");
            Redirect::to(&detail_error(&id, "Could not add note"))
        }
    }
}
