//! Authentication route handlers.
//!
//! Login, registration, Google Sign-In, and logout via the commerce API's
//! auth endpoints. Errors surface as query-parameter flash messages on the
//! form pages.

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

use crate::filters;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form & Query Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Google Sign-In callback form data.
///
/// The Google button posts the ID token in a field named `credential`.
#[derive(Debug, Deserialize)]
pub struct GoogleForm {
    pub credential: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
    pub google_enabled: bool,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page.
#[instrument(skip(state))]
pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    LoginTemplate {
        error: query.error,
        success: query.success,
        google_enabled: state.config().google_client_id.is_some(),
    }
}

/// Handle login form submission.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = AuthService::new(&state);
    match auth.login(&session, &form.email, &form.password).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "customer logged in");
            Redirect::to("/account").into_response()
        }
        Err(e) => {
            tracing::info!("login failed: {e}");
            let message = login_error_message(&e);
            Redirect::to(&format!("/auth/login?error={}", urlencoding::encode(message)))
                .into_response()
        }
    }
}

/// Display the registration page.
#[instrument]
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate { error: query.error }
}

/// Handle registration form submission.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    let auth = AuthService::new(&state);
    match auth
        .register(
            &session,
            &form.name,
            &form.email,
            &form.password,
            &form.password_confirm,
        )
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "customer registered");
            Redirect::to("/account").into_response()
        }
        Err(e) => {
            tracing::info!("registration failed: {e}");
            let message = register_error_message(&e);
            Redirect::to(&format!(
                "/auth/register?error={}",
                urlencoding::encode(message)
            ))
            .into_response()
        }
    }
}

/// Handle the Google Sign-In callback.
#[instrument(skip(state, session, form))]
pub async fn google(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<GoogleForm>,
) -> Response {
    let auth = AuthService::new(&state);
    match auth.login_with_google(&session, &form.credential).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "customer logged in via Google");
            Redirect::to("/account").into_response()
        }
        Err(e) => {
            tracing::info!("google login failed: {e}");
            Redirect::to(&format!(
                "/auth/login?error={}",
                urlencoding::encode("Google sign-in failed")
            ))
            .into_response()
        }
    }
}

/// Handle logout.
#[instrument(skip(state, session))]
pub async fn logout(State(state): State<AppState>, session: Session) -> Response {
    let auth = AuthService::new(&state);
    if let Err(e) = auth.logout(&session).await {
        tracing::error!("logout failed: {e}");
    }
    Redirect::to("/").into_response()
}

// =============================================================================
// Error Messages
// =============================================================================

fn login_error_message(error: &AuthError) -> &'static str {
    match error {
        AuthError::InvalidCredentials => "Invalid email or password",
        AuthError::InvalidEmail(_) => "Please enter a valid email address",
        _ => "Something went wrong, please try again",
    }
}

fn register_error_message(error: &AuthError) -> &'static str {
    match error {
        AuthError::AccountExists => "An account with this email already exists",
        AuthError::PasswordMismatch => "Passwords do not match",
        AuthError::InvalidCredentials => "Password must be at least 8 characters",
        AuthError::InvalidEmail(_) => "Please enter a valid email address",
        _ => "Something went wrong, please try again",
    }
}
