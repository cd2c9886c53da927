//! User-cache repository.
//!
//! Mirrors the minimal commerce-API user profile the guards and account
//! page need, so they work without an API round-trip. The API remains the
//! source of truth; rows here are refreshed on every login.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use wildfig_core::{Email, UserId, UserRole};

use super::RepositoryError;
use crate::models::user::CachedUser;

/// Raw row shape for `user_cache`.
#[derive(sqlx::FromRow)]
struct UserCacheRow {
    id: String,
    email: String,
    name: String,
    role: String,
    updated_at: DateTime<Utc>,
}

impl UserCacheRow {
    fn into_domain(self) -> Result<CachedUser, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role = UserRole::from_str(&self.role).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid role in database: {e}"))
        })?;

        Ok(CachedUser {
            id: UserId::new(self.id),
            email,
            name: self.name,
            role,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for the local user cache.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a cached user by their commerce-API ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored value is invalid.
    pub async fn get_by_id(&self, id: &UserId) -> Result<Option<CachedUser>, RepositoryError> {
        let row = sqlx::query_as::<_, UserCacheRow>(
            "SELECT id, email, name, role, updated_at FROM user_cache WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(UserCacheRow::into_domain).transpose()
    }

    /// Insert or refresh a cached user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(&self, user: &CachedUser) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO user_cache (id, email, name, role, updated_at)
            VALUES ($1, $2, $3, $4, now())
            ON CONFLICT (id) DO UPDATE
            SET email = EXCLUDED.email,
                name = EXCLUDED.name,
                role = EXCLUDED.role,
                updated_at = now()
            ",
        )
        .bind(user.id.as_str())
        .bind(user.email.as_str())
        .bind(&user.name)
        .bind(user.role.to_string())
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Delete a cached user (logout-everywhere / account removal).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: &UserId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM user_cache WHERE id = $1")
            .bind(id.as_str())
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
