use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::db::models::User;
use crate::error::AppError;

/// Persistence the auth flows need. Implemented by `DbOperations` for
/// Postgres; tests substitute an in-memory store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Exact, case-sensitive match on the stored email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_user_by_reset_token(
        &self,
        email: &str,
        token: &str,
    ) -> Result<Option<User>, AppError>;

    /// Overwrites any pending token for the user. Fails with
    /// `DatabaseError::NotFound` when the user no longer exists.
    async fn store_reset_token(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Replaces the password hash and clears both reset fields in one write,
    /// provided `token` is still the user's pending token. Returns whether the
    /// row was updated.
    async fn complete_password_reset(
        &self,
        user_id: i64,
        token: &str,
        password_hash: &str,
    ) -> Result<bool, AppError>;
}
