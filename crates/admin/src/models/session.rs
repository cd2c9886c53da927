//! Session-related types.

use serde::{Deserialize, Serialize};

use wildfig_core::{UserId, UserRole};

/// Session-stored admin identity.
///
/// Only written after a successful login with the admin role; the
/// extractors treat its presence as proof of panel access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Commerce-API user ID.
    pub id: UserId,
    /// Admin's email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Closed role enum; always `Admin` for stored sessions.
    pub role: UserRole,
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
