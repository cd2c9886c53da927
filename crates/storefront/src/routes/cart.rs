//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the session; every mutation loads it, applies
//! one operation, and writes it back before responding.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use wildfig_core::ProductId;
use wildfig_core::cart::{Cart, LineKey, PricingPolicy};

use crate::commerce::cart_line;
use crate::filters;
use crate::state::AppState;
use crate::stores;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    /// Product id for mutation forms.
    pub product_id: String,
    /// Variant name for mutation forms (empty for simple products).
    pub variant: String,
    pub name: String,
    pub slug: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
    pub image: Option<String>,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub tax: String,
    pub shipping: String,
    pub total: String,
    pub item_count: u32,
    pub free_shipping: bool,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "$0.00".to_string(),
            tax: "$0.00".to_string(),
            shipping: "$0.00".to_string(),
            total: "$0.00".to_string(),
            item_count: 0,
            free_shipping: false,
        }
    }

    /// Render a cart under the given pricing policy.
    #[must_use]
    pub fn build(cart: &Cart, policy: &PricingPolicy) -> Self {
        let totals = cart.totals(policy);
        let items = cart
            .lines()
            .iter()
            .map(|line| CartItemView {
                product_id: line.key.product().to_string(),
                variant: line.key.variant().unwrap_or_default().to_string(),
                name: line.display_name(),
                slug: line.product.slug.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price.display(),
                line_total: line.subtotal().display(),
                image: line.product.image.clone(),
            })
            .collect();

        Self {
            items,
            subtotal: totals.subtotal.display(),
            tax: totals.tax.display(),
            shipping: totals.shipping.display(),
            total: totals.total.display(),
            item_count: totals.item_count,
            free_shipping: totals.shipping.is_zero() && !cart.is_empty(),
        }
    }
}

// =============================================================================
// Form Types
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    /// Product slug (the product page knows itself by slug).
    pub slug: String,
    /// Selected variant name, when the product has variants.
    pub variant: Option<String>,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub variant: Option<String>,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
    pub variant: Option<String>,
}

/// Build the stored line key from form fields.
fn form_key(product_id: &str, variant: Option<&String>) -> LineKey {
    let product = ProductId::new(product_id);
    match variant.map(String::as_str).filter(|v| !v.is_empty()) {
        Some(name) => LineKey::with_variant(product, name),
        None => LineKey::simple(product),
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let cart = stores::cart::load(&session).await;
    CartShowTemplate {
        cart: CartView::build(&cart, state.pricing()),
    }
}

/// Add an item to the cart (HTMX).
///
/// Merges by line key, summing quantities when the product (and variant)
/// is already present. Returns an HTMX trigger to update the count badge.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let product = match state.commerce().get_product(&form.slug).await {
        Ok(Some(product)) => product,
        Ok(None) => {
            return (StatusCode::NOT_FOUND, Html("<span>Product not found</span>"))
                .into_response();
        }
        Err(e) => {
            tracing::error!("Failed to fetch product for cart add: {e}");
            return (
                StatusCode::BAD_GATEWAY,
                Html("<span class=\"flash-error\">Error adding to cart</span>"),
            )
                .into_response();
        }
    };

    let variant_name = form.variant.as_deref().filter(|v| !v.is_empty());
    let variant = match variant_name {
        Some(name) => match product.variant_by_name(name) {
            Some(v) => Some(v),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Html("<span class=\"flash-error\">Please choose an option</span>"),
                )
                    .into_response();
            }
        },
        None => None,
    };

    let quantity = form.quantity.unwrap_or(1).max(1);
    let line = cart_line(&product, variant, quantity);

    let mut cart = stores::cart::load(&session).await;
    cart.add(line);

    if let Err(e) = stores::cart::save(&session, &cart).await {
        tracing::error!("Failed to persist cart: {e}");
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.item_count(),
        },
    )
        .into_response()
}

/// Update a cart line's quantity (HTMX).
///
/// Quantity 0 removes the line.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let key = form_key(&form.product_id, form.variant.as_ref());

    let mut cart = stores::cart::load(&session).await;
    cart.set_quantity(&key, form.quantity);

    if let Err(e) = stores::cart::save(&session, &cart).await {
        tracing::error!("Failed to persist cart: {e}");
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::build(&cart, state.pricing()),
        },
    )
        .into_response()
}

/// Remove a line from the cart (HTMX).
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let key = form_key(&form.product_id, form.variant.as_ref());

    let mut cart = stores::cart::load(&session).await;
    cart.remove(&key);

    if let Err(e) = stores::cart::save(&session, &cart).await {
        tracing::error!("Failed to persist cart: {e}");
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::build(&cart, state.pricing()),
        },
    )
        .into_response()
}

/// Empty the cart (HTMX).
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Response {
    let mut cart = stores::cart::load(&session).await;
    cart.clear();

    if let Err(e) = stores::cart::save(&session, &cart).await {
        tracing::error!("Failed to persist cart: {e}");
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::build(&cart, state.pricing()),
        },
    )
        .into_response()
}

/// Get the cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = stores::cart::load(&session).await;
    CartCountTemplate {
        count: cart.item_count(),
    }
}
