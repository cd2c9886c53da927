//! Brand admin CRUD.

use askama::Template;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::commerce::types::{Brand, BrandInput};
use crate::error::AppError;
use crate::{filters, middleware::auth::RequireAdminAuth, state::AppState};

use super::dashboard::AdminUserView;

/// Brand form data.
#[derive(Debug, Deserialize)]
pub struct BrandForm {
    pub name: String,
    pub slug: Option<String>,
    pub logo: Option<String>,
    pub is_active: Option<String>,
}

impl BrandForm {
    fn into_input(self) -> Result<BrandInput, String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_owned());
        }

        let slug = match self.slug.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_owned(),
            _ => self.name.trim().to_lowercase().replace(' ', "-"),
        };

        Ok(BrandInput {
            name: self.name.trim().to_owned(),
            slug,
            logo: self.logo.filter(|l| !l.trim().is_empty()),
            is_active: self.is_active.is_some(),
        })
    }
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Brand row for the list table.
#[derive(Debug, Clone)]
pub struct BrandTableView {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
}

impl From<&Brand> for BrandTableView {
    fn from(brand: &Brand) -> Self {
        Self {
            id: brand.id.to_string(),
            name: brand.name.clone(),
            slug: brand.slug.clone(),
            is_active: brand.is_active,
        }
    }
}

/// Brands list + inline create form template.
#[derive(Template)]
#[template(path = "brands/index.html")]
pub struct BrandsIndexTemplate {
    pub admin_user: AdminUserView,
    pub brands: Vec<BrandTableView>,
    pub error: Option<String>,
}

/// Brands list page.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> Html<String> {
    let brands = match state.commerce().list_brands().await {
        Ok(brands) => brands.iter().map(BrandTableView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch brands: {e}");
            vec![]
        }
    };

    let template = BrandsIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        brands,
        error: query.error,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

/// Create a brand.
#[instrument(skip(_admin, state, form))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<BrandForm>,
) -> Response {
    let input = match form.into_input() {
        Ok(input) => input,
        Err(message) => {
            return Redirect::to(&format!(
                "/brands?error={}",
                urlencoding::encode(&message)
            ))
            .into_response();
        }
    };

    match state.commerce().create_brand(&input).await {
        Ok(brand) => {
            tracing::info!(brand_id = %brand.id, "brand created");
            Redirect::to("/brands").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create brand: {e}");
            Redirect::to(&format!(
                "/brands?error={}",
                urlencoding::encode("Could not create brand")
            ))
            .into_response()
        }
    }
}

/// Update a brand.
#[instrument(skip(_admin, state, form), fields(brand_id = %id))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BrandForm>,
) -> Response {
    let input = match form.into_input() {
        Ok(input) => input,
        Err(message) => {
            return Redirect::to(&format!(
                "/brands?error={}",
                urlencoding::encode(&message)
            ))
            .into_response();
        }
    };

    match state.commerce().update_brand(&id, &input).await {
        Ok(_) => Redirect::to("/brands").into_response(),
        Err(e) => {
            tracing::error!("Failed to update brand: {e}");
            Redirect::to(&format!(
                "/brands?error={}",
                urlencoding::encode("Could not update brand")
            ))
            .into_response()
        }
    }
}

/// Delete a brand.
#[instrument(skip(_admin, state), fields(brand_id = %id))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state.commerce().delete_brand(&id).await?;
    Ok(Redirect::to("/brands"))
}
