//! Authentication extractor for admin routes.
//!
//! A session only ever holds a `CurrentAdmin` written after a login that
//! passed the role check, so the extractor mostly guards against missing
//! sessions. A logged-in non-admin never gets a session here at all; the
//! login handler shows them the not-found page instead of a forbidden
//! page (the API enforces real authorization regardless).

use askama::Template;
use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use wildfig_core::UserRole;

use crate::models::{CurrentAdmin, session_keys};

/// Not-found page rendered for unknown URLs and denied roles alike.
#[derive(Template)]
#[template(path = "shared/not_found.html")]
pub struct NotFoundTemplate;

/// Render the shared not-found page with a 404 status.
#[must_use]
pub fn not_found_response() -> Response {
    let body = NotFoundTemplate.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Not Found".to_string()
    });
    (StatusCode::NOT_FOUND, Html(body)).into_response()
}

/// Extractor that requires an authenticated admin.
///
/// If nobody is logged in, returns a redirect to the login page for HTML
/// requests, or 401 Unauthorized for API requests. A session carrying a
/// non-admin role renders the not-found page.
///
/// # Example
///
/// ```rust,ignore
/// async fn orders_page(
///     RequireAdminAuth(admin): RequireAdminAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

/// Error returned when admin authentication is required but absent.
pub enum AdminAuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
    /// Authenticated but not an admin: rendered as not-found.
    NotAdmin,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::NotAdmin => not_found_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Session is set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection::Unauthorized)?;

        let admin: CurrentAdmin = session
            .get(session_keys::CURRENT_ADMIN)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| {
                let is_api = parts.uri.path().starts_with("/api/");
                if is_api {
                    AdminAuthRejection::Unauthorized
                } else {
                    AdminAuthRejection::RedirectToLogin
                }
            })?;

        // Belt and braces: sessions are only written with the admin role,
        // but a stale session from an account downgrade must still bounce.
        if admin.role != UserRole::Admin {
            return Err(AdminAuthRejection::NotAdmin);
        }

        Ok(Self(admin))
    }
}

/// Helper to set the current admin in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Helper to clear the current admin from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await?;
    Ok(())
}
