//! Product admin CRUD and variant generation.
//!
//! The product form covers both product types; for variant products the
//! option-group inputs feed the generator over HTMX, which returns the
//! generated rows plus a hidden JSON payload the form posts back on save.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use wildfig_core::variants::{OptionGroup, generate};
use wildfig_core::{BrandId, CategoryId, ProductType, StockStatus};

use crate::commerce::types::{Image, Product, ProductInput, Seo, Variant};
use crate::error::AppError;
use crate::{filters, middleware::auth::RequireAdminAuth, state::AppState};

use super::dashboard::AdminUserView;
use super::orders::types::format_price;

/// Products per admin list page.
const PAGE_SIZE: u32 = 25;

// =============================================================================
// Query & Form Types
// =============================================================================

/// List page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub page: Option<u32>,
    pub query: Option<String>,
}

/// Product form data (create and update share the shape).
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub slug: String,
    pub sku: String,
    pub description: Option<String>,
    pub product_type: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub stock: Option<i64>,
    pub low_stock_threshold: Option<i64>,
    pub category_id: Option<String>,
    pub brand_id: Option<String>,
    /// One image URL per line; the first is flagged primary.
    pub images: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    /// Comma-separated keywords.
    pub seo_keywords: Option<String>,
    /// Generated variant rows, round-tripped as JSON.
    pub variants_json: Option<String>,
    pub is_active: Option<String>,
}

impl ProductForm {
    /// Validate and convert to the API payload.
    ///
    /// Enforces the product invariants the original kept in form
    /// validation: at least one image, at least one variant when the type
    /// is variant, exactly one primary image.
    fn into_input(self) -> Result<ProductInput, String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_owned());
        }
        if self.sku.trim().is_empty() {
            return Err("SKU is required".to_owned());
        }

        let product_type = match self.product_type.as_str() {
            "variant" => ProductType::Variant,
            _ => ProductType::Simple,
        };

        let price: Decimal = self
            .price
            .trim()
            .parse()
            .map_err(|_| "Price must be a number".to_owned())?;
        let compare_at_price = match self.compare_at_price.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => {
                Some(s.parse().map_err(|_| "Compare-at price must be a number".to_owned())?)
            }
            _ => None,
        };

        // One URL per line, first is primary - exactly one primary by
        // construction.
        let images: Vec<Image> = self
            .images
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .enumerate()
            .map(|(i, url)| Image {
                url: url.to_owned(),
                alt: None,
                is_primary: i == 0,
            })
            .collect();
        if images.is_empty() {
            return Err("At least one image is required".to_owned());
        }

        let variants: Vec<Variant> = match self.variants_json.as_deref().map(str::trim) {
            Some(json) if !json.is_empty() => serde_json::from_str(json)
                .map_err(|_| "Variant rows are malformed, regenerate them".to_owned())?,
            _ => Vec::new(),
        };
        if product_type == ProductType::Variant && variants.is_empty() {
            return Err("A variant product needs at least one variant".to_owned());
        }

        let seo = match (&self.seo_title, &self.seo_description, &self.seo_keywords) {
            (None, None, None) => None,
            _ => Some(Seo {
                title: self.seo_title.clone().filter(|s| !s.is_empty()),
                description: self.seo_description.clone().filter(|s| !s.is_empty()),
                keywords: self
                    .seo_keywords
                    .as_deref()
                    .unwrap_or("")
                    .split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(str::to_owned)
                    .collect(),
            }),
        };

        let slug = if self.slug.trim().is_empty() {
            slugify(&self.name)
        } else {
            self.slug.trim().to_owned()
        };

        Ok(ProductInput {
            name: self.name.trim().to_owned(),
            slug,
            sku: self.sku.trim().to_owned(),
            description: self.description.filter(|d| !d.trim().is_empty()),
            product_type,
            price,
            compare_at_price,
            stock: self.stock.unwrap_or(0),
            low_stock_threshold: self.low_stock_threshold.unwrap_or(5),
            category_id: self
                .category_id
                .filter(|c| !c.is_empty())
                .map(CategoryId::new),
            brand_id: self.brand_id.filter(|b| !b.is_empty()).map(BrandId::new),
            variants,
            images,
            seo,
            is_active: self.is_active.is_some(),
        })
    }
}

/// Variant generation form data.
///
/// Three fixed option-group slots, matching the form layout; empty slots
/// are skipped.
#[derive(Debug, Deserialize)]
pub struct GenerateVariantsForm {
    pub base_sku: String,
    pub base_price: Option<String>,
    pub option1_name: Option<String>,
    pub option1_values: Option<String>,
    pub option2_name: Option<String>,
    pub option2_values: Option<String>,
    pub option3_name: Option<String>,
    pub option3_values: Option<String>,
}

impl GenerateVariantsForm {
    fn option_groups(&self) -> Vec<OptionGroup> {
        let slots = [
            (&self.option1_name, &self.option1_values),
            (&self.option2_name, &self.option2_values),
            (&self.option3_name, &self.option3_values),
        ];

        slots
            .into_iter()
            .filter_map(|(name, values)| {
                let name = name.as_deref()?.trim();
                if name.is_empty() {
                    return None;
                }
                let values = values
                    .as_deref()
                    .unwrap_or("")
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty());
                Some(OptionGroup::new(name, values))
            })
            .collect()
    }
}

fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

// =============================================================================
// View Types
// =============================================================================

/// Product row for the list table.
#[derive(Debug, Clone)]
pub struct ProductTableView {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub product_type: String,
    pub price: String,
    pub stock: i64,
    pub stock_label: String,
    pub stock_class: String,
    pub variant_count: usize,
    pub is_active: bool,
}

impl From<&Product> for ProductTableView {
    fn from(product: &Product) -> Self {
        let (stock_label, stock_class) =
            match StockStatus::from_level(product.stock, product.low_stock_threshold) {
                StockStatus::InStock => ("In Stock".to_owned(), "badge badge-success".to_owned()),
                StockStatus::LowStock => ("Low Stock".to_owned(), "badge badge-warning".to_owned()),
                StockStatus::OutOfStock => {
                    ("Out of Stock".to_owned(), "badge badge-destructive".to_owned())
                }
            };

        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            sku: product.sku.clone(),
            product_type: match product.product_type {
                ProductType::Simple => "Simple".to_owned(),
                ProductType::Variant => "Variant".to_owned(),
            },
            price: format_price(product.price),
            stock: product.stock,
            stock_label,
            stock_class,
            variant_count: product.variants.len(),
            is_active: product.is_active,
        }
    }
}

/// Select option for category/brand dropdowns.
#[derive(Debug, Clone)]
pub struct SelectOptionView {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

/// Prefill values for the product form.
#[derive(Debug, Clone, Default)]
pub struct ProductFormView {
    pub id: Option<String>,
    pub name: String,
    pub slug: String,
    pub sku: String,
    pub description: String,
    pub is_variant: bool,
    pub price: String,
    pub compare_at_price: String,
    pub stock: i64,
    pub low_stock_threshold: i64,
    pub images: String,
    pub seo_title: String,
    pub seo_description: String,
    pub seo_keywords: String,
    pub variants_json: String,
    pub variant_count: usize,
    pub is_active: bool,
}

impl ProductFormView {
    fn blank() -> Self {
        Self {
            low_stock_threshold: 5,
            is_active: true,
            ..Self::default()
        }
    }

    fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id.to_string()),
            name: product.name.clone(),
            slug: product.slug.clone(),
            sku: product.sku.clone(),
            description: product.description.clone().unwrap_or_default(),
            is_variant: product.product_type == ProductType::Variant,
            price: product.price.to_string(),
            compare_at_price: product
                .compare_at_price
                .map(|p| p.to_string())
                .unwrap_or_default(),
            stock: product.stock,
            low_stock_threshold: product.low_stock_threshold,
            images: product
                .images
                .iter()
                .map(|i| i.url.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
            seo_title: product
                .seo
                .as_ref()
                .and_then(|s| s.title.clone())
                .unwrap_or_default(),
            seo_description: product
                .seo
                .as_ref()
                .and_then(|s| s.description.clone())
                .unwrap_or_default(),
            seo_keywords: product
                .seo
                .as_ref()
                .map(|s| s.keywords.join(", "))
                .unwrap_or_default(),
            variants_json: serde_json::to_string(&product.variants).unwrap_or_default(),
            variant_count: product.variants.len(),
            is_active: product.is_active,
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Products list template.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub admin_user: AdminUserView,
    pub products: Vec<ProductTableView>,
    pub page: u32,
    pub total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
    pub search_value: Option<String>,
}

/// Product form template (create and edit).
#[derive(Template)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub admin_user: AdminUserView,
    pub form: ProductFormView,
    pub categories: Vec<SelectOptionView>,
    pub brands: Vec<SelectOptionView>,
    pub error: Option<String>,
}

/// Generated variant rows fragment (HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "products/partials/variant_rows.html")]
pub struct VariantRowsTemplate {
    pub variants: Vec<Variant>,
    pub variants_json: String,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Products list page.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Html<String> {
    let page_number = query.page.unwrap_or(1).max(1);
    let search = query.query.clone().filter(|q| !q.is_empty());

    let (products, page, total_pages) = match state
        .commerce()
        .list_products(page_number, PAGE_SIZE, search)
        .await
    {
        Ok(page) => (
            page.items.iter().map(ProductTableView::from).collect(),
            page.page,
            page.total_pages,
        ),
        Err(e) => {
            tracing::error!("Failed to fetch products: {e}");
            (vec![], page_number, 0)
        }
    };

    let template = ProductsIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        products,
        page,
        total_pages,
        has_prev: page > 1,
        has_next: page < total_pages,
        search_value: query.query,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

/// Load category/brand dropdown options.
async fn select_options(
    state: &AppState,
    selected_category: Option<&str>,
    selected_brand: Option<&str>,
) -> (Vec<SelectOptionView>, Vec<SelectOptionView>) {
    let categories = state
        .commerce()
        .list_categories()
        .await
        .unwrap_or_default()
        .iter()
        .map(|c| SelectOptionView {
            id: c.id.to_string(),
            name: c.name.clone(),
            selected: selected_category == Some(c.id.as_str()),
        })
        .collect();

    let brands = state
        .commerce()
        .list_brands()
        .await
        .unwrap_or_default()
        .iter()
        .map(|b| SelectOptionView {
            id: b.id.to_string(),
            name: b.name.clone(),
            selected: selected_brand == Some(b.id.as_str()),
        })
        .collect();

    (categories, brands)
}

/// Blank product form.
#[instrument(skip(admin, state))]
pub async fn new(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Html<String> {
    let (categories, brands) = select_options(&state, None, None).await;

    let template = ProductFormTemplate {
        admin_user: AdminUserView::from(&admin),
        form: ProductFormView::blank(),
        categories,
        brands,
        error: None,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

/// Create a product.
#[instrument(skip(_admin, state, form))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Response {
    let input = match form.into_input() {
        Ok(input) => input,
        Err(message) => {
            return Redirect::to(&format!(
                "/products/new?error={}",
                urlencoding::encode(&message)
            ))
            .into_response();
        }
    };

    match state.commerce().create_product(&input).await {
        Ok(product) => {
            tracing::info!(product_id = %product.id, "product created");
            Redirect::to("/products").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create product: {e}");
            Redirect::to(&format!(
                "/products/new?error={}",
                urlencoding::encode("Could not create product")
            ))
            .into_response()
        }
    }
}

/// Edit form for an existing product.
#[instrument(skip(admin, state), fields(product_id = %id))]
pub async fn edit(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let product = match state.commerce().get_product(&id).await {
        Ok(Some(product)) => product,
        Ok(None) => return (StatusCode::NOT_FOUND, "Product not found").into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch product: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch product").into_response();
        }
    };

    let (categories, brands) = select_options(
        &state,
        product.category_id.as_ref().map(CategoryId::as_str),
        product.brand_id.as_ref().map(BrandId::as_str),
    )
    .await;

    let template = ProductFormTemplate {
        admin_user: AdminUserView::from(&admin),
        form: ProductFormView::from_product(&product),
        categories,
        brands,
        error: None,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
    .into_response()
}

/// Update a product.
#[instrument(skip(_admin, state, form), fields(product_id = %id))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Response {
    let input = match form.into_input() {
        Ok(input) => input,
        Err(message) => {
            return Redirect::to(&format!(
                "/products/{id}/edit?error={}",
                urlencoding::encode(&message)
            ))
            .into_response();
        }
    };

    match state.commerce().update_product(&id, &input).await {
        Ok(_) => Redirect::to("/products").into_response(),
        Err(e) => {
            tracing::error!("Failed to update product: {e}");
            Redirect::to(&format!(
                "/products/{id}/edit?error={}",
                urlencoding::encode("Could not update product")
            ))
            .into_response()
        }
    }
}

/// Delete a product.
#[instrument(skip(_admin, state), fields(product_id = %id))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state.commerce().delete_product(&id).await?;
    tracing::info!("product deleted");
    Ok(Redirect::to("/products"))
}

/// Generate variant rows from the option groups (HTMX).
#[instrument(skip(_admin, form))]
pub async fn generate_variants(
    RequireAdminAuth(_admin): RequireAdminAuth,
    Form(form): Form<GenerateVariantsForm>,
) -> Response {
    let groups = form.option_groups();
    if groups.is_empty() {
        return VariantRowsTemplate {
            variants: vec![],
            variants_json: String::new(),
            error: Some("Add at least one option group".to_owned()),
        }
        .into_response();
    }

    let base_price: Decimal = form
        .base_price
        .as_deref()
        .unwrap_or("0")
        .trim()
        .parse()
        .unwrap_or(Decimal::ZERO);

    match generate(form.base_sku.trim(), &groups) {
        Ok(generated) => {
            let variants: Vec<Variant> = generated
                .into_iter()
                .map(|g| Variant {
                    id: None,
                    name: g.name,
                    sku: g.sku,
                    price: base_price,
                    stock: 0,
                    attributes: g.attributes,
                })
                .collect();
            let variants_json = serde_json::to_string(&variants).unwrap_or_default();

            VariantRowsTemplate {
                variants,
                variants_json,
                error: None,
            }
            .into_response()
        }
        Err(e) => VariantRowsTemplate {
            variants: vec![],
            variants_json: String::new(),
            error: Some(e.to_string()),
        }
        .into_response(),
    }
}
