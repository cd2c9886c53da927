//! Authentication service.
//!
//! Wraps the commerce API's auth endpoints and owns the session side of
//! authentication: storing the current user and token pair, mirroring the
//! profile into the local user cache, and refreshing expired access
//! tokens.
//!
//! Guard resolution falls back in a fixed order: session user → cached
//! user row → token refresh. The first two exist because the access token
//! alone is not readable as a profile (the HttpOnly-cookie workaround the
//! original carried, made explicit).

mod error;

pub use error::AuthError;

use chrono::Utc;
use tower_sessions::Session;

use wildfig_core::Email;

use crate::commerce::types::AuthSession;
use crate::db::users::UserRepository;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::session::SessionTokens;
use crate::models::{CachedUser, CurrentUser, session_keys};
use crate::state::AppState;

/// Minimum password length enforced before calling the API.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service bound to the shared application state.
pub struct AuthService<'a> {
    state: &'a AppState,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    // =========================================================================
    // Credential flows
    // =========================================================================

    /// Log in with email and password, establishing the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on rejection, or another
    /// `AuthError` if the API call or session write fails.
    pub async fn login(
        &self,
        session: &Session,
        email: &str,
        password: &str,
    ) -> Result<CurrentUser, AuthError> {
        let email = Email::parse(email)?;
        let auth = self
            .state
            .commerce()
            .login(email.as_str(), password)
            .await?;
        self.establish(session, auth).await
    }

    /// Register a new account, establishing the session on success.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordMismatch`, `AuthError::AccountExists`,
    /// or another `AuthError` if the API call or session write fails.
    pub async fn register(
        &self,
        session: &Session,
        name: &str,
        email: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<CurrentUser, AuthError> {
        let email = Email::parse(email)?;
        if password != password_confirm {
            return Err(AuthError::PasswordMismatch);
        }
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::InvalidCredentials);
        }

        let auth = self
            .state
            .commerce()
            .register(name, email.as_str(), password)
            .await?;
        self.establish(session, auth).await
    }

    /// Log in with a Google ID token, establishing the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on rejection, or another
    /// `AuthError` if the API call or session write fails.
    pub async fn login_with_google(
        &self,
        session: &Session,
        id_token: &str,
    ) -> Result<CurrentUser, AuthError> {
        let auth = self.state.commerce().login_with_google(id_token).await?;
        self.establish(session, auth).await
    }

    /// Clear all authentication state from the session and drop the
    /// cached profile row.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn logout(&self, session: &Session) -> Result<(), AuthError> {
        // Read the user before the session forgets who they were
        let user: Option<CurrentUser> = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten();

        clear_current_user(session).await?;
        session
            .remove::<SessionTokens>(session_keys::AUTH_TOKENS)
            .await?;

        if let Some(user) = user
            && let Err(e) = UserRepository::new(self.state.pool()).delete(&user.id).await
        {
            tracing::warn!("failed to drop user cache row on logout: {e}");
        }

        crate::error::clear_sentry_user();
        Ok(())
    }

    // =========================================================================
    // Token management
    // =========================================================================

    /// Get a usable access token for the session's user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionExpired` if the session holds no tokens.
    pub async fn access_token(&self, session: &Session) -> Result<String, AuthError> {
        let tokens: SessionTokens = session
            .get(session_keys::AUTH_TOKENS)
            .await
            .ok()
            .flatten()
            .ok_or(AuthError::SessionExpired)?;
        Ok(tokens.access_token)
    }

    /// Validate the session against the API without credentials by
    /// exchanging the refresh token for a fresh pair.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionExpired` if there is no refresh token or
    /// the API rejects it; the caller should send the user to login.
    pub async fn refresh(&self, session: &Session) -> Result<CurrentUser, AuthError> {
        let tokens: SessionTokens = session
            .get(session_keys::AUTH_TOKENS)
            .await
            .ok()
            .flatten()
            .ok_or(AuthError::SessionExpired)?;

        let auth = self
            .state
            .commerce()
            .refresh_session(&tokens.refresh_token)
            .await
            .map_err(|e| match e {
                crate::commerce::CommerceError::Unauthorized => AuthError::SessionExpired,
                other => AuthError::Commerce(other),
            })?;

        self.establish(session, auth).await
    }

    /// Resolve the current user.
    ///
    /// Falls back in a fixed order: the session-stored user, then a token
    /// refresh against the API (which also rewrites the session). The
    /// cached profile row cannot stand in here - without a session user
    /// there is no id to key it by - so it serves the account page, not
    /// the guard.
    pub async fn resolve_current_user(&self, session: &Session) -> Option<CurrentUser> {
        // 1. Session-stored user
        if let Ok(Some(user)) = session
            .get::<CurrentUser>(session_keys::CURRENT_USER)
            .await
        {
            return Some(user);
        }

        // 2. Token refresh (the session may have been thinned while the
        //    tokens survived)
        match self.refresh(session).await {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!("could not resolve user from session: {e}");
                None
            }
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Store the session state and mirror the profile into the user cache.
    async fn establish(
        &self,
        session: &Session,
        auth: AuthSession,
    ) -> Result<CurrentUser, AuthError> {
        let email = Email::parse(&auth.user.email)?;
        let user = CurrentUser {
            id: auth.user.id.clone(),
            email: email.clone(),
            name: auth.user.name.clone(),
            role: auth.user.role,
        };

        set_current_user(session, &user).await?;
        session
            .insert(
                session_keys::AUTH_TOKENS,
                SessionTokens {
                    access_token: auth.access_token,
                    refresh_token: auth.refresh_token,
                },
            )
            .await?;

        // Mirror into the local cache so guards and the account page can
        // read the profile without an API round-trip.
        let cached = CachedUser {
            id: user.id.clone(),
            email,
            name: user.name.clone(),
            role: user.role,
            updated_at: Utc::now(),
        };
        if let Err(e) = UserRepository::new(self.state.pool()).upsert(&cached).await {
            tracing::warn!("failed to refresh user cache: {e}");
        }

        crate::error::set_sentry_user(&user.id, Some(user.email.as_str()));

        Ok(user)
    }
}
