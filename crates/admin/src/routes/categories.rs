//! Category admin CRUD.

use askama::Template;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use wildfig_core::ParentCategory;

use crate::commerce::types::{Category, CategoryInput};
use crate::error::AppError;
use crate::{filters, middleware::auth::RequireAdminAuth, state::AppState};

use super::dashboard::AdminUserView;

/// Category form data.
#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    pub slug: Option<String>,
    pub image: Option<String>,
    /// Classification label: "men", "women", "children", or empty.
    pub parent: Option<String>,
    pub is_active: Option<String>,
}

impl CategoryForm {
    fn into_input(self) -> Result<CategoryInput, String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_owned());
        }

        let parent = match self.parent.as_deref().map(str::trim) {
            Some("men") => Some(ParentCategory::Men),
            Some("women") => Some(ParentCategory::Women),
            Some("children") => Some(ParentCategory::Children),
            _ => None,
        };

        let slug = match self.slug.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_owned(),
            _ => self.name.trim().to_lowercase().replace(' ', "-"),
        };

        Ok(CategoryInput {
            name: self.name.trim().to_owned(),
            slug,
            image: self.image.filter(|i| !i.trim().is_empty()),
            parent,
            is_active: self.is_active.is_some(),
        })
    }
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Category row for the list table.
#[derive(Debug, Clone)]
pub struct CategoryTableView {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub parent: String,
    pub is_active: bool,
}

impl From<&Category> for CategoryTableView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.clone(),
            slug: category.slug.clone(),
            parent: category
                .parent
                .map(|p| p.label().to_owned())
                .unwrap_or_default(),
            is_active: category.is_active,
        }
    }
}

/// Categories list + inline create form template.
#[derive(Template)]
#[template(path = "categories/index.html")]
pub struct CategoriesIndexTemplate {
    pub admin_user: AdminUserView,
    pub categories: Vec<CategoryTableView>,
    pub error: Option<String>,
}

/// Categories list page.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> Html<String> {
    let categories = match state.commerce().list_categories().await {
        Ok(categories) => categories.iter().map(CategoryTableView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch categories: {e}");
            vec![]
        }
    };

    let template = CategoriesIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        categories,
        error: query.error,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

/// Create a category.
#[instrument(skip(_admin, state, form))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<CategoryForm>,
) -> Response {
    let input = match form.into_input() {
        Ok(input) => input,
        Err(message) => {
            return Redirect::to(&format!(
                "/categories?error={}",
                urlencoding::encode(&message)
            ))
            .into_response();
        }
    };

    match state.commerce().create_category(&input).await {
        Ok(category) => {
            tracing::info!(category_id = %category.id, "category created");
            Redirect::to("/categories").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create category: {e}");
            Redirect::to(&format!(
                "/categories?error={}",
                urlencoding::encode("Could not create category")
            ))
            .into_response()
        }
    }
}

/// Update a category.
#[instrument(skip(_admin, state, form), fields(category_id = %id))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<CategoryForm>,
) -> Response {
    let input = match form.into_input() {
        Ok(input) => input,
        Err(message) => {
            return Redirect::to(&format!(
                "/categories?error={}",
                urlencoding::encode(&message)
            ))
            .into_response();
        }
    };

    match state.commerce().update_category(&id, &input).await {
        Ok(_) => Redirect::to("/categories").into_response(),
        Err(e) => {
            tracing::error!("Failed to update category: {e}");
            Redirect::to(&format!(
                "/categories?error={}",
                urlencoding::encode("Could not update category")
            ))
            .into_response()
        }
    }
}

/// Delete a category.
#[instrument(skip(_admin, state), fields(category_id = %id))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state.commerce().delete_category(&id).await?;
    Ok(Redirect::to("/categories"))
}
