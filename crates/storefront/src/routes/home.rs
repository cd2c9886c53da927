//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::commerce::types::ProductsQuery;
use crate::filters;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Featured products shown on the home page.
const FEATURED_COUNT: u32 = 8;

/// Category card for the home page.
#[derive(Clone)]
pub struct CategoryCardView {
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub featured: Vec<ProductCardView>,
    pub categories: Vec<CategoryCardView>,
}

/// Home page: featured products and category tiles.
///
/// Both sections degrade to empty on API failure - the home page must
/// render even when the commerce API is down.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let featured = match state
        .commerce()
        .get_products(&ProductsQuery::first_page(FEATURED_COUNT))
        .await
    {
        Ok(page) => page.items.iter().map(ProductCardView::from).collect(),
        Err(e) => {
            tracing::warn!("Failed to fetch featured products: {e}");
            vec![]
        }
    };

    let categories = match state.commerce().get_categories().await {
        Ok(categories) => categories
            .into_iter()
            .filter(|c| c.is_active)
            .map(|c| CategoryCardView {
                name: c.name,
                slug: c.slug,
                image: c.image,
            })
            .collect(),
        Err(e) => {
            tracing::warn!("Failed to fetch categories: {e}");
            vec![]
        }
    };

    HomeTemplate {
        featured,
        categories,
    }
}
