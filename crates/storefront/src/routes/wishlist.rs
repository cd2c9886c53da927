//! Wishlist route handlers.
//!
//! Adds are idempotent by product id; the handlers redirect back to the
//! wishlist page rather than returning fragments, since saves are rare
//! compared to cart churn.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use wildfig_core::ProductId;

use crate::commerce::product_snapshot;
use crate::filters;
use crate::state::AppState;
use crate::stores;

/// Wishlist item display data.
#[derive(Clone)]
pub struct WishlistItemView {
    pub product_id: String,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub added_at: String,
}

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist/show.html")]
pub struct WishlistShowTemplate {
    pub items: Vec<WishlistItemView>,
}

/// Save-product form data.
#[derive(Debug, Deserialize)]
pub struct AddToWishlistForm {
    pub slug: String,
}

/// Remove-product form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromWishlistForm {
    pub product_id: String,
}

/// Display the wishlist page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let wishlist = stores::wishlist::load(&session).await;
    let items = wishlist
        .items()
        .iter()
        .map(|item| WishlistItemView {
            product_id: item.product.id.to_string(),
            name: item.product.name.clone(),
            slug: item.product.slug.clone(),
            image: item.product.image.clone(),
            added_at: item.added_at.format("%b %-d, %Y").to_string(),
        })
        .collect();

    WishlistShowTemplate { items }
}

/// Save a product. A product already on the list is left untouched.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToWishlistForm>,
) -> Response {
    let product = match state.commerce().get_product(&form.slug).await {
        Ok(Some(product)) => product,
        Ok(None) => return Redirect::to("/wishlist").into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch product for wishlist: {e}");
            return Redirect::to("/wishlist").into_response();
        }
    };

    let mut wishlist = stores::wishlist::load(&session).await;
    wishlist.add(product_snapshot(&product), Utc::now());

    if let Err(e) = stores::wishlist::save(&session, &wishlist).await {
        tracing::error!("Failed to persist wishlist: {e}");
    }

    Redirect::to("/wishlist").into_response()
}

/// Remove a saved product.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromWishlistForm>) -> Response {
    let mut wishlist = stores::wishlist::load(&session).await;
    wishlist.remove(&ProductId::new(form.product_id));

    if let Err(e) = stores::wishlist::save(&session, &wishlist).await {
        tracing::error!("Failed to persist wishlist: {e}");
    }

    Redirect::to("/wishlist").into_response()
}

/// Empty the wishlist.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Response {
    let mut wishlist = stores::wishlist::load(&session).await;
    wishlist.clear();

    if let Err(e) = stores::wishlist::save(&session, &wishlist).await {
        tracing::error!("Failed to persist wishlist: {e}");
    }

    Redirect::to("/wishlist").into_response()
}
