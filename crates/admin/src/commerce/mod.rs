//! Backoffice commerce API client with service-token authentication.
//!
//! The client exchanges its long-lived service key for a short-lived
//! access token and attaches it to every request in the `auth-token`
//! header. When a request comes back 401, the token is refreshed through
//! a single-flight path and the request retried once: concurrent handlers
//! that all hit 401 at the same moment trigger exactly one exchange, and
//! the rest reuse its result.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, RwLock};
use tracing::instrument;

use wildfig_core::OrderStatus;

use crate::config::BackofficeApiConfig;

mod error;
pub mod types;

pub use error::BackofficeError;

use types::{
    AuthSession, Brand, BrandInput, Category, CategoryInput, CommonResponse, DashboardSummary,
    Order, OrderStats, OrdersListQuery, Paged, Product, ProductInput, ServiceTokenResponse,
    ShippingUpdate,
};

/// Name of the access-token header the API expects.
const AUTH_TOKEN_HEADER: &str = "auth-token";

/// Backoffice commerce API client.
///
/// # Security
///
/// This client authenticates with the HIGH PRIVILEGE service key, which
/// has full store access. Only run the admin binary on trusted
/// infrastructure.
#[derive(Clone)]
pub struct BackofficeClient {
    inner: Arc<BackofficeClientInner>,
}

struct BackofficeClientInner {
    client: reqwest::Client,
    api_url: String,
    service_key: String,
    /// Current access token plus a generation counter. The generation lets
    /// a waiter detect that someone else already refreshed while it was
    /// queued on `refresh_lock`.
    token: RwLock<TokenState>,
    /// Single-flight guard for token refresh.
    refresh_lock: Mutex<()>,
}

#[derive(Default)]
struct TokenState {
    access_token: Option<String>,
    generation: u64,
}

impl BackofficeClient {
    /// Create a new backoffice client.
    #[must_use]
    pub fn new(config: &BackofficeApiConfig) -> Self {
        Self {
            inner: Arc::new(BackofficeClientInner {
                client: reqwest::Client::new(),
                api_url: config.api_url.clone(),
                service_key: config.service_key.expose_secret().to_string(),
                token: RwLock::new(TokenState::default()),
                refresh_lock: Mutex::new(()),
            }),
        }
    }

    // =========================================================================
    // Token management
    // =========================================================================

    /// Snapshot the current token and its generation.
    async fn current_token(&self) -> (Option<String>, u64) {
        let state = self.inner.token.read().await;
        (state.access_token.clone(), state.generation)
    }

    /// Exchange the service key for a fresh access token.
    ///
    /// `observed_generation` is what the caller last saw; if the stored
    /// generation has already moved past it the refresh was done by
    /// another task and its token is returned without a network call.
    async fn refresh_token(&self, observed_generation: u64) -> Result<String, BackofficeError> {
        let _guard = self.inner.refresh_lock.lock().await;

        // Someone ahead of us in the queue may already have refreshed
        {
            let state = self.inner.token.read().await;
            if state.generation != observed_generation
                && let Some(token) = &state.access_token
            {
                return Ok(token.clone());
            }
        }

        let url = format!("{}/api/auth/service", self.inner.api_url);
        let response = self
            .inner
            .client
            .post(&url)
            .json(&serde_json::json!({ "serviceKey": self.inner.service_key }))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(BackofficeError::Unauthorized);
        }

        let envelope: CommonResponse<ServiceTokenResponse> = response.json().await?;
        let token = envelope
            .data
            .ok_or(BackofficeError::MissingData)?
            .access_token;

        let mut state = self.inner.token.write().await;
        state.access_token = Some(token.clone());
        state.generation = state.generation.wrapping_add(1);

        Ok(token)
    }

    /// Get a usable access token, exchanging the service key on first use.
    async fn ensure_token(&self) -> Result<(String, u64), BackofficeError> {
        let (token, generation) = self.current_token().await;
        if let Some(token) = token {
            return Ok((token, generation));
        }
        let token = self.refresh_token(generation).await?;
        let (_, generation) = self.current_token().await;
        Ok((token, generation))
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.api_url)
    }

    /// Execute a request with one coalesced refresh + retry on 401.
    async fn execute<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<T, BackofficeError> {
        let (token, generation) = self.ensure_token().await?;

        match self.send(method.clone(), path, query, body, &token).await {
            Err(BackofficeError::Unauthorized) => {
                let token = self.refresh_token(generation).await?;
                self.send(method, path, query, body, &token).await
            }
            other => other,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
        token: &str,
    ) -> Result<T, BackofficeError> {
        let mut request = self
            .inner
            .client
            .request(method, self.url(path))
            .header(AUTH_TOKEN_HEADER, token);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        Self::decode(response).await
    }

    /// Map HTTP status, then unwrap the `CommonResponse` envelope.
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackofficeError> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(BackofficeError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(BackofficeError::RateLimited(retry_after));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<CommonResponse<serde_json::Value>>(&text)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or(text);
            return Err(BackofficeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: CommonResponse<T> = response.json().await?;
        if !envelope.success {
            return Err(BackofficeError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "no message provided".to_owned()),
            ));
        }
        envelope.data.ok_or(BackofficeError::MissingData)
    }

    /// Treat a 404 as `None`.
    fn optional<T>(result: Result<T, BackofficeError>) -> Result<Option<T>, BackofficeError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(BackofficeError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    // =========================================================================
    // Panel login
    // =========================================================================

    /// Authenticate an admin user for panel access.
    ///
    /// This is interactive authN only; data-plane calls use the service
    /// token. The caller is responsible for checking the returned role.
    ///
    /// # Errors
    ///
    /// Returns `BackofficeError::Unauthorized` on wrong credentials.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn admin_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, BackofficeError> {
        let response = self
            .inner
            .client
            .post(self.url("/api/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        Self::decode(response).await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Get a filtered, paged list of orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        query: &OrdersListQuery,
    ) -> Result<Paged<Order>, BackofficeError> {
        let mut params: Vec<(&str, String)> = vec![
            ("page", query.page.max(1).to_string()),
            ("limit", query.limit.max(1).to_string()),
        ];
        if let Some(status) = query.status {
            params.push(("status", status.as_str().to_owned()));
        }
        if let Some(payment_status) = query.payment_status {
            params.push(("paymentStatus", payment_status.label().to_lowercase()));
        }
        if let Some(search) = &query.search
            && !search.is_empty()
        {
            params.push(("search", search.clone()));
        }
        if let Some(from) = &query.date_from
            && !from.is_empty()
        {
            params.push(("dateFrom", from.clone()));
        }
        if let Some(to) = &query.date_to
            && !to.is_empty()
        {
            params.push(("dateTo", to.clone()));
        }

        self.execute(reqwest::Method::GET, "/api/order", &params, None)
            .await
    }

    /// Get an order by ID. Returns `None` when the API answers 404.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get_order(&self, id: &str) -> Result<Option<Order>, BackofficeError> {
        let result = self
            .execute(reqwest::Method::GET, &format!("/api/order/{id}"), &[], None)
            .await;
        Self::optional(result)
    }

    /// Update an order's status.
    ///
    /// The transition is validated against the order's current status
    /// before the PUT goes out; an illegal transition never reaches the
    /// API.
    ///
    /// # Errors
    ///
    /// Returns `BackofficeError::IllegalTransition` for a move the
    /// transition table forbids, `Api { status: 404, .. }` for an unknown
    /// order, or another error if the request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn update_order_status(
        &self,
        id: &str,
        new_status: OrderStatus,
    ) -> Result<Order, BackofficeError> {
        let current = self.get_order(id).await?.ok_or(BackofficeError::Api {
            status: 404,
            message: format!("order {id} not found"),
        })?;

        if !current.status.can_transition_to(new_status) {
            return Err(BackofficeError::IllegalTransition {
                from: current.status.to_string(),
                to: new_status.to_string(),
            });
        }

        let body = serde_json::json!({ "status": new_status });
        self.execute(
            reqwest::Method::PUT,
            &format!("/api/order/{id}/status"),
            &[],
            Some(&body),
        )
        .await
    }

    /// Update an order's shipping info (carrier, tracking number).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self, update), fields(order_id = %id))]
    pub async fn update_shipping(
        &self,
        id: &str,
        update: &ShippingUpdate,
    ) -> Result<Order, BackofficeError> {
        let body = serde_json::to_value(update)?;
        self.execute(
            reqwest::Method::PUT,
            &format!("/api/order/{id}/shipping"),
            &[],
            Some(&body),
        )
        .await
    }

    /// Append a note to an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self, text), fields(order_id = %id))]
    pub async fn add_order_note(
        &self,
        id: &str,
        text: &str,
        author: &str,
    ) -> Result<Order, BackofficeError> {
        let body = serde_json::json!({ "text": text, "author": author });
        self.execute(
            reqwest::Method::POST,
            &format!("/api/order/{id}/notes"),
            &[],
            Some(&body),
        )
        .await
    }

    /// Get order status counts and revenue for the list header.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self))]
    pub async fn order_stats(&self) -> Result<OrderStats, BackofficeError> {
        self.execute(reqwest::Method::GET, "/api/order/stats", &[], None)
            .await
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Get a paged product list with optional search.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        page: u32,
        limit: u32,
        search: Option<String>,
    ) -> Result<Paged<Product>, BackofficeError> {
        let mut params: Vec<(&str, String)> = vec![
            ("page", page.max(1).to_string()),
            ("limit", limit.max(1).to_string()),
        ];
        if let Some(search) = search
            && !search.is_empty()
        {
            params.push(("search", search));
        }
        self.execute(reqwest::Method::GET, "/api/product", &params, None)
            .await
    }

    /// Get a product by ID. Returns `None` when the API answers 404.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &str) -> Result<Option<Product>, BackofficeError> {
        let result = self
            .execute(
                reqwest::Method::GET,
                &format!("/api/product/{id}"),
                &[],
                None,
            )
            .await;
        Self::optional(result)
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the payload or the request
    /// fails.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, BackofficeError> {
        let body = serde_json::to_value(input)?;
        self.execute(reqwest::Method::POST, "/api/product", &[], Some(&body))
            .await
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the payload or the request
    /// fails.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &str,
        input: &ProductInput,
    ) -> Result<Product, BackofficeError> {
        let body = serde_json::to_value(input)?;
        self.execute(
            reqwest::Method::PUT,
            &format!("/api/product/{id}"),
            &[],
            Some(&body),
        )
        .await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &str) -> Result<(), BackofficeError> {
        let _: serde_json::Value = self
            .execute(
                reqwest::Method::DELETE,
                &format!("/api/product/{id}"),
                &[],
                None,
            )
            .await?;
        Ok(())
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// Get all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, BackofficeError> {
        self.execute(reqwest::Method::GET, "/api/category", &[], None)
            .await
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the payload or the request
    /// fails.
    #[instrument(skip(self, input), fields(category_name = %input.name))]
    pub async fn create_category(
        &self,
        input: &CategoryInput,
    ) -> Result<Category, BackofficeError> {
        let body = serde_json::to_value(input)?;
        self.execute(reqwest::Method::POST, "/api/category", &[], Some(&body))
            .await
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the payload or the request
    /// fails.
    #[instrument(skip(self, input), fields(category_id = %id))]
    pub async fn update_category(
        &self,
        id: &str,
        input: &CategoryInput,
    ) -> Result<Category, BackofficeError> {
        let body = serde_json::to_value(input)?;
        self.execute(
            reqwest::Method::PUT,
            &format!("/api/category/{id}"),
            &[],
            Some(&body),
        )
        .await
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete_category(&self, id: &str) -> Result<(), BackofficeError> {
        let _: serde_json::Value = self
            .execute(
                reqwest::Method::DELETE,
                &format!("/api/category/{id}"),
                &[],
                None,
            )
            .await?;
        Ok(())
    }

    // =========================================================================
    // Brands
    // =========================================================================

    /// Get all brands.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self))]
    pub async fn list_brands(&self) -> Result<Vec<Brand>, BackofficeError> {
        self.execute(reqwest::Method::GET, "/api/brand", &[], None)
            .await
    }

    /// Create a brand.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the payload or the request
    /// fails.
    #[instrument(skip(self, input), fields(brand_name = %input.name))]
    pub async fn create_brand(&self, input: &BrandInput) -> Result<Brand, BackofficeError> {
        let body = serde_json::to_value(input)?;
        self.execute(reqwest::Method::POST, "/api/brand", &[], Some(&body))
            .await
    }

    /// Update a brand.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the payload or the request
    /// fails.
    #[instrument(skip(self, input), fields(brand_id = %id))]
    pub async fn update_brand(
        &self,
        id: &str,
        input: &BrandInput,
    ) -> Result<Brand, BackofficeError> {
        let body = serde_json::to_value(input)?;
        self.execute(
            reqwest::Method::PUT,
            &format!("/api/brand/{id}"),
            &[],
            Some(&body),
        )
        .await
    }

    /// Delete a brand.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self), fields(brand_id = %id))]
    pub async fn delete_brand(&self, id: &str) -> Result<(), BackofficeError> {
        let _: serde_json::Value = self
            .execute(
                reqwest::Method::DELETE,
                &format!("/api/brand/{id}"),
                &[],
                None,
            )
            .await?;
        Ok(())
    }

    // =========================================================================
    // Analytics
    // =========================================================================

    /// Get the dashboard summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self))]
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, BackofficeError> {
        self.execute(reqwest::Method::GET, "/api/analytics/dashboard", &[], None)
            .await
    }
}
