//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Dashboard
//! GET  /health                  - Health check
//!
//! # Auth
//! GET  /auth/login              - Login page
//! POST /auth/login              - Login action (admin role required)
//! POST /auth/logout             - Logout action
//!
//! # Orders
//! GET  /orders                  - Orders list (filters, paging, stats)
//! GET  /orders/export.csv       - CSV export of the filtered list
//! POST /orders/bulk/status      - Bulk status update over selected IDs
//! GET  /orders/{id}             - Order detail with status tracker
//! POST /orders/{id}/status      - Status change (transition-validated)
//! POST /orders/{id}/shipping    - Carrier / tracking update
//! POST /orders/{id}/notes       - Append a note
//! GET  /orders/{id}/print       - Invoice / packing slip (?type=)
//!
//! # Products
//! GET  /products                - Product list
//! GET  /products/new            - Blank product form
//! POST /products                - Create product
//! GET  /products/{id}/edit      - Edit product form
//! POST /products/{id}           - Update product
//! POST /products/{id}/delete    - Delete product
//! POST /products/variants/generate - Variant generator fragment (HTMX)
//!
//! # Categories / Brands
//! GET  /categories              - List + inline create form
//! POST /categories              - Create
//! POST /categories/{id}         - Update
//! POST /categories/{id}/delete  - Delete
//! GET  /brands                  - List + inline create form
//! POST /brands                  - Create
//! POST /brands/{id}             - Update
//! POST /brands/{id}/delete      - Delete
//! ```

pub mod auth;
pub mod brands;
pub mod categories;
pub mod dashboard;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::auth::not_found_response;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/new", get(products::new))
        .route("/variants/generate", post(products::generate_variants))
        .route("/{id}", post(products::update))
        .route("/{id}/edit", get(products::edit))
        .route("/{id}/delete", post(products::delete))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index).post(categories::create))
        .route("/{id}", post(categories::update))
        .route("/{id}/delete", post(categories::delete))
}

/// Create the brand routes router.
pub fn brand_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(brands::index).post(brands::create))
        .route("/{id}", post(brands::update))
        .route("/{id}/delete", post(brands::delete))
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .nest("/auth", auth_routes())
        .nest("/orders", orders::routes())
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        .nest("/brands", brand_routes())
        .fallback(|| async { not_found_response() })
}
