//! Session-related types.
//!
//! Types stored in the session for authentication state, plus the cart and
//! wishlist stores (the browser-localStorage analogue: one writer per
//! session, persisted on every mutation).

use serde::{Deserialize, Serialize};

use wildfig_core::{Email, UserId, UserRole};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Commerce-API user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Closed role enum.
    pub role: UserRole,
}

/// Access/refresh token pair for the commerce API, held per session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Session keys for stored state.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the commerce-API token pair.
    pub const AUTH_TOKENS: &str = "auth_tokens";

    /// Key for the cart store.
    pub const CART: &str = "cart";

    /// Key for the wishlist store.
    pub const WISHLIST: &str = "wishlist";
}
