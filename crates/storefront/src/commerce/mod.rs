//! Commerce REST API client (storefront surface).
//!
//! Typed wrapper over the external commerce API: catalog reads (cached),
//! customer auth, and order placement. Every response is wrapped in the
//! `CommonResponse { success, data, message }` envelope; authenticated
//! calls send the access token in the `auth-token` header.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config::CommerceApiConfig;

pub mod cache;
mod conversions;
mod error;
pub mod types;

pub use conversions::{cart_line, order_input_from_cart, product_snapshot, variant_snapshot};
pub use error::CommerceError;

use cache::{CacheKey, CacheValue};
use types::{
    ApiBrand, ApiCategory, ApiOrder, ApiProduct, AuthSession, CommonResponse, OrderInput, Paged,
    ProductsQuery,
};

/// Name of the access-token header the API expects.
const AUTH_TOKEN_HEADER: &str = "auth-token";

/// Catalog cache time-to-live.
const CATALOG_CACHE_TTL: Duration = Duration::from_secs(60);

/// Maximum cached catalog entries.
const CATALOG_CACHE_CAPACITY: u64 = 512;

/// Storefront-facing commerce API client.
///
/// Cheaply cloneable; holds a shared HTTP connection pool and the catalog
/// cache.
#[derive(Clone)]
pub struct CommerceClient {
    inner: Arc<CommerceClientInner>,
}

struct CommerceClientInner {
    client: reqwest::Client,
    api_url: String,
    catalog_cache: moka::future::Cache<CacheKey, CacheValue>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GoogleLoginBody<'a> {
    id_token: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshBody<'a> {
    refresh_token: &'a str,
}

impl CommerceClient {
    /// Create a new client.
    #[must_use]
    pub fn new(config: &CommerceApiConfig) -> Self {
        let catalog_cache = moka::future::Cache::builder()
            .max_capacity(CATALOG_CACHE_CAPACITY)
            .time_to_live(CATALOG_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(CommerceClientInner {
                client: reqwest::Client::new(),
                api_url: config.api_url.clone(),
                catalog_cache,
            }),
        }
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.api_url)
    }

    async fn get_enveloped<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        token: Option<&str>,
    ) -> Result<T, CommerceError> {
        let mut request = self.inner.client.get(self.url(path)).query(query);
        if let Some(token) = token {
            request = request.header(AUTH_TOKEN_HEADER, token);
        }
        let response = request.send().await?;
        Self::decode(response).await
    }

    async fn post_enveloped<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, CommerceError> {
        let mut request = self.inner.client.post(self.url(path)).json(body);
        if let Some(token) = token {
            request = request.header(AUTH_TOKEN_HEADER, token);
        }
        let response = request.send().await?;
        Self::decode(response).await
    }

    /// Map HTTP status, then unwrap the `CommonResponse` envelope.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, CommerceError> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(CommerceError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(CommerceError::RateLimited(retry_after));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<CommonResponse<serde_json::Value>>(&text)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or(text);
            return Err(CommerceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: CommonResponse<T> = response.json().await?;
        if !envelope.success {
            return Err(CommerceError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "no message provided".to_owned()),
            ));
        }
        envelope.data.ok_or(CommerceError::MissingData)
    }

    /// Treat a 404 as `None`.
    fn optional<T>(result: Result<T, CommerceError>) -> Result<Option<T>, CommerceError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(CommerceError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Get a page of products, optionally filtered.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        query: &ProductsQuery,
    ) -> Result<Paged<ApiProduct>, CommerceError> {
        let key = CacheKey::Products {
            page: query.page,
            limit: query.limit,
            category: query.category.clone(),
            brand: query.brand.clone(),
            search: query.search.clone(),
        };

        if let Some(CacheValue::Products(page)) = self.inner.catalog_cache.get(&key).await {
            return Ok(page);
        }

        let mut params: Vec<(&str, String)> = vec![
            ("page", query.page.max(1).to_string()),
            ("limit", query.limit.max(1).to_string()),
        ];
        if let Some(category) = &query.category {
            params.push(("category", category.clone()));
        }
        if let Some(brand) = &query.brand {
            params.push(("brand", brand.clone()));
        }
        if let Some(search) = &query.search
            && !search.is_empty()
        {
            params.push(("search", search.clone()));
        }

        let page: Paged<ApiProduct> = self.get_enveloped("/api/product", &params, None).await?;
        self.inner
            .catalog_cache
            .insert(key, CacheValue::Products(page.clone()))
            .await;
        Ok(page)
    }

    /// Get a product by slug. Returns `None` when the API answers 404.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self), fields(product_slug = %slug))]
    pub async fn get_product(&self, slug: &str) -> Result<Option<ApiProduct>, CommerceError> {
        let key = CacheKey::Product(slug.to_owned());
        if let Some(CacheValue::Product(product)) = self.inner.catalog_cache.get(&key).await {
            return Ok(Some(*product));
        }

        let result = self
            .get_enveloped::<ApiProduct>(&format!("/api/product/{slug}"), &[], None)
            .await;

        match Self::optional(result)? {
            Some(product) => {
                self.inner
                    .catalog_cache
                    .insert(key, CacheValue::Product(Box::new(product.clone())))
                    .await;
                Ok(Some(product))
            }
            None => Ok(None),
        }
    }

    /// Get all active categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<ApiCategory>, CommerceError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.catalog_cache.get(&CacheKey::Categories).await
        {
            return Ok(categories);
        }

        let categories: Vec<ApiCategory> = self.get_enveloped("/api/category", &[], None).await?;
        self.inner
            .catalog_cache
            .insert(CacheKey::Categories, CacheValue::Categories(categories.clone()))
            .await;
        Ok(categories)
    }

    /// Get all active brands.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self))]
    pub async fn get_brands(&self) -> Result<Vec<ApiBrand>, CommerceError> {
        if let Some(CacheValue::Brands(brands)) =
            self.inner.catalog_cache.get(&CacheKey::Brands).await
        {
            return Ok(brands);
        }

        let brands: Vec<ApiBrand> = self.get_enveloped("/api/brand", &[], None).await?;
        self.inner
            .catalog_cache
            .insert(CacheKey::Brands, CacheValue::Brands(brands.clone()))
            .await;
        Ok(brands)
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `CommerceError::Unauthorized` on wrong credentials, or
    /// another error if the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, CommerceError> {
        self.post_enveloped("/api/auth/login", &LoginBody { email, password }, None)
            .await
    }

    /// Register a new customer account.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the registration (e.g., the
    /// email is taken) or the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, CommerceError> {
        self.post_enveloped(
            "/api/auth/register",
            &RegisterBody {
                name,
                email,
                password,
            },
            None,
        )
        .await
    }

    /// Log in with a Google ID token.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the token or the request fails.
    #[instrument(skip(self, id_token))]
    pub async fn login_with_google(&self, id_token: &str) -> Result<AuthSession, CommerceError> {
        self.post_enveloped("/api/auth/google", &GoogleLoginBody { id_token }, None)
            .await
    }

    /// Exchange a refresh token for a new session without credentials.
    ///
    /// # Errors
    ///
    /// Returns `CommerceError::Unauthorized` if the refresh token is
    /// invalid or expired.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, CommerceError> {
        self.post_enveloped("/api/auth/refresh", &RefreshBody { refresh_token }, None)
            .await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Place an order.
    ///
    /// # Errors
    ///
    /// Returns `CommerceError::Unauthorized` if the access token has
    /// expired, or another error if the request fails.
    #[instrument(skip(self, access_token, input))]
    pub async fn create_order(
        &self,
        access_token: &str,
        input: &OrderInput,
    ) -> Result<ApiOrder, CommerceError> {
        self.post_enveloped("/api/order", input, Some(access_token))
            .await
    }

    /// Get the logged-in customer's order history.
    ///
    /// # Errors
    ///
    /// Returns `CommerceError::Unauthorized` if the access token has
    /// expired, or another error if the request fails.
    #[instrument(skip(self, access_token))]
    pub async fn my_orders(
        &self,
        access_token: &str,
        page: u32,
        limit: u32,
    ) -> Result<Paged<ApiOrder>, CommerceError> {
        let params = [
            ("page", page.max(1).to_string()),
            ("limit", limit.max(1).to_string()),
        ];
        self.get_enveloped("/api/order/my", &params, Some(access_token))
            .await
    }

    /// Get one of the logged-in customer's orders by ID.
    ///
    /// # Errors
    ///
    /// Returns `CommerceError::Unauthorized` if the access token has
    /// expired, or another error if the request fails.
    #[instrument(skip(self, access_token), fields(order_id = %id))]
    pub async fn get_my_order(
        &self,
        access_token: &str,
        id: &str,
    ) -> Result<Option<ApiOrder>, CommerceError> {
        let result = self
            .get_enveloped::<ApiOrder>(&format!("/api/order/{id}"), &[], Some(access_token))
            .await;
        Self::optional(result)
    }
}
