//! Catalog route handlers: product listing and detail pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use wildfig_core::{Money, StockStatus};

use crate::commerce::types::{ApiProduct, ProductsQuery};
use crate::error::AppError;
use crate::filters;
use crate::state::AppState;

/// Products per listing page.
const PAGE_SIZE: u32 = 12;

// =============================================================================
// Query & View Types
// =============================================================================

/// Listing page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub page: Option<u32>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub search: Option<String>,
}

/// Product card for grid displays.
#[derive(Clone)]
pub struct ProductCardView {
    pub name: String,
    pub slug: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub image: Option<String>,
    pub stock_label: Option<String>,
    pub stock_class: String,
}

impl From<&ApiProduct> for ProductCardView {
    fn from(product: &ApiProduct) -> Self {
        let (stock_label, stock_class) =
            match StockStatus::from_level(product.stock, product.low_stock_threshold) {
                StockStatus::InStock => (None, String::new()),
                StockStatus::LowStock => {
                    (Some("Low Stock".to_string()), "badge badge-low".to_string())
                }
                StockStatus::OutOfStock => (
                    Some("Out of Stock".to_string()),
                    "badge badge-out".to_string(),
                ),
            };

        Self {
            name: product.name.clone(),
            slug: product.slug.clone(),
            price: Money::new(product.price, Default::default()).display(),
            compare_at_price: product
                .compare_at_price
                .map(|p| Money::new(p, Default::default()).display()),
            image: product.primary_image().map(str::to_owned),
            stock_label,
            stock_class,
        }
    }
}

/// Filter link for the category/brand sidebar.
#[derive(Clone)]
pub struct FilterLinkView {
    pub name: String,
    pub slug: String,
    pub selected: bool,
}

/// Variant option for the detail page selector.
#[derive(Clone)]
pub struct VariantOptionView {
    pub name: String,
    pub price: String,
    pub in_stock: bool,
}

/// Image for the detail page gallery.
#[derive(Clone)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

/// Product detail view.
#[derive(Clone)]
pub struct ProductDetailView {
    pub name: String,
    pub slug: String,
    pub sku: String,
    pub description: Option<String>,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub images: Vec<ImageView>,
    pub has_variants: bool,
    pub variants: Vec<VariantOptionView>,
    pub in_stock: bool,
    pub stock_label: String,
    pub category_name: Option<String>,
    pub brand_name: Option<String>,
}

impl From<&ApiProduct> for ProductDetailView {
    fn from(product: &ApiProduct) -> Self {
        let stock_status = StockStatus::from_level(product.stock, product.low_stock_threshold);
        let variants = product
            .variants
            .iter()
            .map(|v| VariantOptionView {
                name: v.name.clone(),
                price: Money::new(v.price, Default::default()).display(),
                in_stock: v.stock > 0,
            })
            .collect();

        Self {
            name: product.name.clone(),
            slug: product.slug.clone(),
            sku: product.sku.clone(),
            description: product.description.clone(),
            price: Money::new(product.price, Default::default()).display(),
            compare_at_price: product
                .compare_at_price
                .map(|p| Money::new(p, Default::default()).display()),
            images: product
                .images
                .iter()
                .map(|i| ImageView {
                    url: i.url.clone(),
                    alt: i.alt.clone().unwrap_or_else(|| product.name.clone()),
                })
                .collect(),
            has_variants: !product.variants.is_empty(),
            variants,
            in_stock: stock_status != StockStatus::OutOfStock,
            stock_label: stock_status.label().to_string(),
            category_name: product.category.as_ref().map(|c| c.name.clone()),
            brand_name: product.brand.as_ref().map(|b| b.name.clone()),
        }
    }
}

/// Build URL parameters preserved across pagination links.
fn build_preserve_params(query: &IndexQuery) -> String {
    let mut params = Vec::new();

    if let Some(c) = &query.category
        && !c.is_empty()
    {
        params.push(format!("category={}", urlencoding::encode(c)));
    }
    if let Some(b) = &query.brand
        && !b.is_empty()
    {
        params.push(format!("brand={}", urlencoding::encode(b)));
    }
    if let Some(s) = &query.search
        && !s.is_empty()
    {
        params.push(format!("search={}", urlencoding::encode(s)));
    }

    if params.is_empty() {
        String::new()
    } else {
        format!("&{}", params.join("&"))
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCardView>,
    pub categories: Vec<FilterLinkView>,
    pub brands: Vec<FilterLinkView>,
    pub page: u32,
    pub total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
    pub search_value: Option<String>,
    pub preserve_params: String,
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
}

// =============================================================================
// Handlers
// =============================================================================

/// Product listing page with filters and pagination.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Result<Response, AppError> {
    let products_query = ProductsQuery {
        page: query.page.unwrap_or(1).max(1),
        limit: PAGE_SIZE,
        category: query.category.clone().filter(|c| !c.is_empty()),
        brand: query.brand.clone().filter(|b| !b.is_empty()),
        search: query.search.clone().filter(|s| !s.is_empty()),
    };

    let page = state.commerce().get_products(&products_query).await?;

    // Filter bars degrade to empty on failure rather than killing the page
    let categories = state.commerce().get_categories().await.unwrap_or_default();
    let brands = state.commerce().get_brands().await.unwrap_or_default();

    let categories = categories
        .iter()
        .filter(|c| c.is_active)
        .map(|c| FilterLinkView {
            name: c.name.clone(),
            slug: c.slug.clone(),
            selected: products_query.category.as_deref() == Some(c.slug.as_str()),
        })
        .collect();
    let brands = brands
        .iter()
        .filter(|b| b.is_active)
        .map(|b| FilterLinkView {
            name: b.name.clone(),
            slug: b.slug.clone(),
            selected: products_query.brand.as_deref() == Some(b.slug.as_str()),
        })
        .collect();

    let template = ProductsIndexTemplate {
        products: page.items.iter().map(ProductCardView::from).collect(),
        categories,
        brands,
        page: page.page,
        total_pages: page.total_pages,
        has_prev: page.page > 1,
        has_next: page.has_next_page(),
        search_value: products_query.search,
        preserve_params: build_preserve_params(&query),
    };

    Ok(template.into_response())
}

/// Product detail page.
#[instrument(skip(state), fields(product_slug = %slug))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let product = state
        .commerce()
        .get_product(&slug)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))?;

    let template = ProductShowTemplate {
        product: ProductDetailView::from(&product),
    };

    Ok(template.into_response())
}
