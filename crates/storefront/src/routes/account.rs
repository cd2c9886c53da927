//! Account area handlers: profile, order history, order detail.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use wildfig_core::{Money, OrderStatus, TrackerStep};

use crate::commerce::CommerceError;
use crate::commerce::types::{ApiOrder, Paged};
use crate::db::users::UserRepository;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Orders per history page.
const ORDERS_PAGE_SIZE: u32 = 10;

// =============================================================================
// View Types
// =============================================================================

/// Order row for the history table.
#[derive(Clone)]
pub struct OrderRowView {
    pub id: String,
    pub order_number: String,
    pub created_at: String,
    pub status: String,
    pub item_count: u32,
    pub total: String,
}

impl From<&ApiOrder> for OrderRowView {
    fn from(order: &ApiOrder) -> Self {
        Self {
            id: order.id.to_string(),
            order_number: order.order_number.clone(),
            created_at: order.created_at.clone(),
            status: order.status.label().to_string(),
            item_count: order.items.iter().map(|i| i.quantity).sum(),
            total: Money::new(order.total, Default::default()).display(),
        }
    }
}

/// One step of the rendered status tracker.
#[derive(Clone)]
pub struct TrackerStepView {
    pub label: String,
    pub reached: bool,
    pub current: bool,
}

/// Build the 4-step tracker projection for a status.
///
/// Returns an empty tracker for cancelled orders - the template shows a
/// banner instead.
#[must_use]
pub fn build_tracker(status: OrderStatus) -> Vec<TrackerStepView> {
    let Some(current) = status.tracker_step() else {
        return Vec::new();
    };

    TrackerStep::ALL
        .iter()
        .map(|step| TrackerStepView {
            label: step.label().to_string(),
            reached: step.position() <= current.position(),
            current: *step == current,
        })
        .collect()
}

/// Ordered line item for the detail page.
#[derive(Clone)]
pub struct OrderItemView {
    pub name: String,
    pub sku: String,
    pub quantity: u32,
    pub unit_price: String,
    pub subtotal: String,
}

/// Order detail view.
#[derive(Clone)]
pub struct OrderDetailView {
    pub order_number: String,
    pub created_at: String,
    pub status: String,
    pub is_cancelled: bool,
    pub payment_method: String,
    pub payment_status: String,
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    pub items: Vec<OrderItemView>,
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub discount: String,
    pub total: String,
    pub shipping_address: Vec<String>,
}

impl From<&ApiOrder> for OrderDetailView {
    fn from(order: &ApiOrder) -> Self {
        let items = order
            .items
            .iter()
            .map(|item| OrderItemView {
                name: item.variant_name.as_ref().map_or_else(
                    || item.product_name.clone(),
                    |v| format!("{} ({v})", item.product_name),
                ),
                sku: item.sku.clone(),
                quantity: item.quantity,
                unit_price: Money::new(item.unit_price, Default::default()).display(),
                subtotal: Money::new(item.subtotal, Default::default()).display(),
            })
            .collect();

        let mut shipping_address = vec![order.shipping_address.line1.clone()];
        if let Some(line2) = &order.shipping_address.line2 {
            shipping_address.push(line2.clone());
        }
        shipping_address.push(format!(
            "{}, {} {}",
            order.shipping_address.city,
            order.shipping_address.state,
            order.shipping_address.postal_code
        ));
        shipping_address.push(order.shipping_address.country.clone());

        Self {
            order_number: order.order_number.clone(),
            created_at: order.created_at.clone(),
            status: order.status.label().to_string(),
            is_cancelled: order.status == OrderStatus::Cancelled,
            payment_method: order.payment.method.clone(),
            payment_status: order.payment.status.label().to_string(),
            tracking_number: order.shipping.tracking_number.clone(),
            carrier: order.shipping.carrier.clone(),
            items,
            subtotal: Money::new(order.subtotal, Default::default()).display(),
            shipping: Money::new(order.shipping_cost, Default::default()).display(),
            tax: Money::new(order.tax, Default::default()).display(),
            discount: Money::new(order.discount, Default::default()).display(),
            total: Money::new(order.total, Default::default()).display(),
            shipping_address,
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Account overview template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountTemplate {
    pub user: CurrentUser,
}

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "account/orders.html")]
pub struct AccountOrdersTemplate {
    pub orders: Vec<OrderRowView>,
    pub page: u32,
    pub total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
}

/// Order detail template.
#[derive(Template, WebTemplate)]
#[template(path = "account/order_detail.html")]
pub struct AccountOrderDetailTemplate {
    pub order: OrderDetailView,
    pub tracker: Vec<TrackerStepView>,
}

/// Pagination query.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Account overview page.
///
/// Uses the full guard fallback (session user → token refresh) rather
/// than the bare extractor, so a thinned-out session with surviving
/// tokens still lands here instead of on the login page. The displayed
/// profile prefers the cached row, which login keeps fresh.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> Response {
    let auth = AuthService::new(&state);
    let Some(user) = auth.resolve_current_user(&session).await else {
        return Redirect::to("/auth/login").into_response();
    };

    let user = match UserRepository::new(state.pool()).get_by_id(&user.id).await {
        Ok(Some(cached)) => CurrentUser {
            id: cached.id,
            email: cached.email,
            name: cached.name,
            role: cached.role,
        },
        Ok(None) => user,
        Err(e) => {
            tracing::warn!("user cache lookup failed: {e}");
            user
        }
    };

    AccountTemplate { user }.into_response()
}

/// Order history page.
#[instrument(skip(state, session, _user))]
pub async fn orders(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PageQuery>,
) -> Response {
    let page_number = query.page.unwrap_or(1).max(1);

    let page = match fetch_orders(&state, &session, page_number).await {
        Ok(page) => page,
        Err(FetchError::LoginRequired) => return Redirect::to("/auth/login").into_response(),
        Err(FetchError::Commerce(e)) => {
            tracing::error!("Failed to fetch order history: {e}");
            Paged {
                items: vec![],
                page: page_number,
                limit: ORDERS_PAGE_SIZE,
                total: 0,
                total_pages: 0,
            }
        }
    };

    AccountOrdersTemplate {
        orders: page.items.iter().map(OrderRowView::from).collect(),
        page: page.page,
        total_pages: page.total_pages,
        has_prev: page.page > 1,
        has_next: page.has_next_page(),
    }
    .into_response()
}

/// Order detail page with the 4-step status tracker.
#[instrument(skip(state, session, _user), fields(order_id = %id))]
pub async fn order_detail(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Response {
    let auth = AuthService::new(&state);
    let Ok(token) = auth.access_token(&session).await else {
        return Redirect::to("/auth/login").into_response();
    };

    let result = state.commerce().get_my_order(&token, &id).await;
    let result = match result {
        Err(CommerceError::Unauthorized) => match auth.refresh(&session).await {
            Ok(_) => match auth.access_token(&session).await {
                Ok(token) => state.commerce().get_my_order(&token, &id).await,
                Err(_) => return Redirect::to("/auth/login").into_response(),
            },
            Err(_) => return Redirect::to("/auth/login").into_response(),
        },
        other => other,
    };

    match result {
        Ok(Some(order)) => AccountOrderDetailTemplate {
            tracker: build_tracker(order.status),
            order: OrderDetailView::from(&order),
        }
        .into_response(),
        Ok(None) => Redirect::to("/account/orders").into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch order detail: {e}");
            Redirect::to("/account/orders").into_response()
        }
    }
}

// =============================================================================
// Internals
// =============================================================================

enum FetchError {
    LoginRequired,
    Commerce(CommerceError),
}

/// Fetch a history page with a single refresh-and-retry on 401.
async fn fetch_orders(
    state: &AppState,
    session: &Session,
    page: u32,
) -> Result<Paged<ApiOrder>, FetchError> {
    let auth = AuthService::new(state);
    let token = auth
        .access_token(session)
        .await
        .map_err(|_| FetchError::LoginRequired)?;

    match state
        .commerce()
        .my_orders(&token, page, ORDERS_PAGE_SIZE)
        .await
    {
        Err(CommerceError::Unauthorized) => {
            auth.refresh(session)
                .await
                .map_err(|_| FetchError::LoginRequired)?;
            let token = auth
                .access_token(session)
                .await
                .map_err(|_| FetchError::LoginRequired)?;
            state
                .commerce()
                .my_orders(&token, page, ORDERS_PAGE_SIZE)
                .await
                .map_err(FetchError::Commerce)
        }
        other => other.map_err(FetchError::Commerce),
    }
}
