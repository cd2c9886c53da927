//! User domain types.

use chrono::{DateTime, Utc};

use wildfig_core::{Email, UserId, UserRole};

/// A locally cached commerce-API user profile.
///
/// The API is the source of truth; this row exists so guard checks and the
/// account page work without a round-trip.
#[derive(Debug, Clone)]
pub struct CachedUser {
    /// Commerce-API user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Closed role enum (replaces the old free-form role string).
    pub role: UserRole,
    /// When this cache row was last refreshed.
    pub updated_at: DateTime<Utc>,
}
