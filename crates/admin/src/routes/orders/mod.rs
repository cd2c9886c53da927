//! Order management routes.

pub mod actions;
pub mod bulk;
pub mod detail;
pub mod export;
pub mod list;
pub mod print;
pub mod types;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the orders router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list::index))
        .route("/export.csv", get(export::export))
        .route("/bulk/status", post(bulk::bulk_update_status))
        .route("/{id}", get(detail::show))
        .route("/{id}/status", post(actions::update_status))
        .route("/{id}/shipping", post(actions::update_shipping))
        .route("/{id}/notes", post(actions::add_note))
        .route("/{id}/print", get(print::print))
}
