//! Error types for the backoffice commerce API client.

use thiserror::Error;

/// Errors from the backoffice commerce API client.
#[derive(Debug, Error)]
pub enum BackofficeError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success HTTP status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The envelope arrived with `success: false`.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// A write payload failed to serialize.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// `success: true` but no `data` payload.
    #[error("response contained no data")]
    MissingData,

    /// The service token was rejected even after a refresh.
    #[error("unauthorized")]
    Unauthorized,

    /// Rate limited; retry after the given number of seconds.
    #[error("rate limited, retry after {0}s")]
    RateLimited(u64),

    /// An order status change that the transition table forbids.
    #[error("illegal status transition: {from} -> {to}")]
    IllegalTransition { from: String, to: String },
}
