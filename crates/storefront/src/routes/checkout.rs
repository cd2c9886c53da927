//! Checkout route handlers.
//!
//! Collects address and payment form data, assembles the order payload
//! from the session cart under the single pricing policy, posts it to the
//! order API, and clears the cart on success. A 401 from the API gets one
//! token refresh and one retry; a second failure sends the user to login.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::commerce::types::{ApiAddress, ApiCustomer};
use crate::commerce::{CommerceError, order_input_from_cart};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::services::auth::AuthService;
use crate::state::AppState;
use crate::stores;

use super::cart::CartView;

// =============================================================================
// Form Types
// =============================================================================

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,

    pub ship_line1: String,
    pub ship_line2: Option<String>,
    pub ship_city: String,
    pub ship_state: String,
    pub ship_postal_code: String,
    pub ship_country: String,

    /// Checkbox: billing address same as shipping.
    pub bill_same: Option<String>,
    pub bill_line1: Option<String>,
    pub bill_line2: Option<String>,
    pub bill_city: Option<String>,
    pub bill_state: Option<String>,
    pub bill_postal_code: Option<String>,
    pub bill_country: Option<String>,

    pub payment_method: String,
}

impl CheckoutForm {
    fn shipping_address(&self) -> ApiAddress {
        ApiAddress {
            line1: self.ship_line1.clone(),
            line2: self.ship_line2.clone().filter(|l| !l.is_empty()),
            city: self.ship_city.clone(),
            state: self.ship_state.clone(),
            postal_code: self.ship_postal_code.clone(),
            country: self.ship_country.clone(),
        }
    }

    fn billing_address(&self) -> ApiAddress {
        if self.bill_same.is_some() {
            return self.shipping_address();
        }
        ApiAddress {
            line1: self.bill_line1.clone().unwrap_or_default(),
            line2: self.bill_line2.clone().filter(|l| !l.is_empty()),
            city: self.bill_city.clone().unwrap_or_default(),
            state: self.bill_state.clone().unwrap_or_default(),
            postal_code: self.bill_postal_code.clone().unwrap_or_default(),
            country: self.bill_country.clone().unwrap_or_default(),
        }
    }

    /// Field-keyed validation, mirroring what the form marks required.
    fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("Name is required");
        }
        if self.email.trim().is_empty() {
            return Err("Email is required");
        }
        if self.ship_line1.trim().is_empty() || self.ship_city.trim().is_empty() {
            return Err("Shipping address is incomplete");
        }
        if self.bill_same.is_none()
            && self.bill_line1.as_deref().unwrap_or("").trim().is_empty()
        {
            return Err("Billing address is incomplete");
        }
        if self.payment_method.trim().is_empty() {
            return Err("Please choose a payment method");
        }
        Ok(())
    }
}

/// Query parameters for the confirmation page.
#[derive(Debug, Deserialize)]
pub struct CompleteQuery {
    pub order: Option<String>,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub cart: CartView,
    pub name: String,
    pub email: String,
    pub error: Option<String>,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/complete.html")]
pub struct CheckoutCompleteTemplate {
    pub order_number: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the checkout form.
#[instrument(skip(state, session, user))]
pub async fn show(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<MessageQuery>,
) -> Response {
    let cart = stores::cart::load(&session).await;
    if cart.is_empty() {
        return Redirect::to("/cart").into_response();
    }

    CheckoutTemplate {
        cart: CartView::build(&cart, state.pricing()),
        name: user.name,
        email: user.email.to_string(),
        error: query.error,
    }
    .into_response()
}

/// Place the order.
#[instrument(skip(state, session, form, _user))]
pub async fn place(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Response {
    if let Err(message) = form.validate() {
        return checkout_error(message);
    }

    let cart = stores::cart::load(&session).await;
    if cart.is_empty() {
        return Redirect::to("/cart").into_response();
    }

    let input = order_input_from_cart(
        &cart,
        state.pricing(),
        ApiCustomer {
            name: form.name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone().filter(|p| !p.is_empty()),
        },
        form.shipping_address(),
        form.billing_address(),
        form.payment_method.clone(),
    );

    let auth = AuthService::new(&state);
    let token = match auth.access_token(&session).await {
        Ok(token) => token,
        Err(_) => return Redirect::to("/auth/login").into_response(),
    };

    let result = state.commerce().create_order(&token, &input).await;
    let result = match result {
        // One coalesced refresh + retry on an expired access token
        Err(CommerceError::Unauthorized) => match auth.refresh(&session).await {
            Ok(_) => match auth.access_token(&session).await {
                Ok(token) => state.commerce().create_order(&token, &input).await,
                Err(_) => return Redirect::to("/auth/login").into_response(),
            },
            Err(e) => {
                tracing::info!("token refresh failed at checkout: {e}");
                return Redirect::to("/auth/login").into_response();
            }
        },
        other => other,
    };

    match result {
        Ok(order) => {
            // Cleared only after the API accepted the order
            if let Err(e) = stores::cart::clear(&session).await {
                tracing::error!("failed to clear cart after order placement: {e}");
            }
            tracing::info!(order_id = %order.id, "order placed");
            Redirect::to(&format!(
                "/checkout/complete?order={}",
                urlencoding::encode(&order.order_number)
            ))
            .into_response()
        }
        Err(e) => {
            tracing::error!("order placement failed: {e}");
            checkout_error("We could not place your order, please try again")
        }
    }
}

/// Order confirmation page.
#[instrument]
pub async fn complete(Query(query): Query<CompleteQuery>) -> Response {
    let Some(order_number) = query.order.filter(|o| !o.is_empty()) else {
        return Redirect::to("/").into_response();
    };

    CheckoutCompleteTemplate { order_number }.into_response()
}

fn checkout_error(message: &str) -> Response {
    Redirect::to(&format!("/checkout?error={}", urlencoding::encode(message))).into_response()
}
