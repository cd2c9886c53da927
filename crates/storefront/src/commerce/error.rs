//! Error types for the commerce API client.

use thiserror::Error;

/// Errors from the commerce REST API client.
#[derive(Debug, Error)]
pub enum CommerceError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success HTTP status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The envelope arrived with `success: false`.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// `success: true` but no `data` payload.
    #[error("response contained no data")]
    MissingData,

    /// The access token was missing, invalid, or expired.
    #[error("unauthorized")]
    Unauthorized,

    /// Rate limited; retry after the given number of seconds.
    #[error("rate limited, retry after {0}s")]
    RateLimited(u64),
}
