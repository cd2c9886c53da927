//! Admin panel authentication handlers.
//!
//! Login goes through the commerce API's auth endpoint; only accounts
//! with the admin role get a panel session. Any other role is answered
//! with the not-found page rather than a forbidden page.

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

use crate::middleware::auth::not_found_response;
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Display the login page.
#[instrument]
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate { error: query.error }
}

/// Handle login form submission.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = match state
        .commerce()
        .admin_login(&form.email, &form.password)
        .await
    {
        Ok(auth) => auth,
        Err(e) => {
            tracing::info!("admin login failed: {e}");
            return Redirect::to(&format!(
                "/auth/login?error={}",
                urlencoding::encode("Invalid email or password")
            ))
            .into_response();
        }
    };

    // Role gate: a valid customer login is still not an admin. Answer
    // with not-found, exactly as an unknown URL would.
    if !auth.user.role.is_admin() {
        tracing::warn!(user_id = %auth.user.id, "non-admin login attempt on admin panel");
        return not_found_response();
    }

    let admin = CurrentAdmin {
        id: auth.user.id.clone(),
        email: auth.user.email.clone(),
        name: auth.user.name.clone(),
        role: auth.user.role,
    };

    if let Err(e) = set_current_admin(&session, &admin).await {
        tracing::error!("failed to store admin session: {e}");
        return Redirect::to(&format!(
            "/auth/login?error={}",
            urlencoding::encode("Could not start a session")
        ))
        .into_response();
    }

    crate::error::set_sentry_user(&admin.id, Some(&admin.email));
    tracing::info!(admin_id = %admin.id, "admin logged in");
    Redirect::to("/").into_response()
}

/// Handle logout.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_admin(&session).await {
        tracing::error!("logout failed: {e}");
    }
    crate::error::clear_sentry_user();
    Redirect::to("/auth/login").into_response()
}
