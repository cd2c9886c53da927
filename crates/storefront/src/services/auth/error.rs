//! Authentication service errors.

use thiserror::Error;

use crate::commerce::CommerceError;
use crate::db::RepositoryError;
use wildfig_core::EmailError;

/// Errors from the authentication service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong email/password (or rejected Google token).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration with an email that already has an account.
    #[error("account already exists")]
    AccountExists,

    /// Email failed structural validation before hitting the API.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Refresh token rejected; the user must sign in again.
    #[error("session expired")]
    SessionExpired,

    /// Commerce API failure other than an auth rejection.
    #[error("commerce API error: {0}")]
    Commerce(CommerceError),

    /// Local user-cache failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Session store failure.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl From<CommerceError> for AuthError {
    fn from(err: CommerceError) -> Self {
        match err {
            CommerceError::Unauthorized => Self::InvalidCredentials,
            CommerceError::Api { status: 409, .. } => Self::AccountExists,
            other => Self::Commerce(other),
        }
    }
}
