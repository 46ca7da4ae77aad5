//! Domain service for authentication and the account's display name.
//!
//! Session bookkeeping lives in the HTTP layer; this service only answers
//! "who is this" questions against the store.

use thiserror::Error;

use crate::models::User;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Store errors that wrap a `DbErr` (directly or under `.context`) are
/// reported as database failures.
impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        if err.downcast_ref::<sea_orm::DbErr>().is_some() {
            Self::Database(format!("{err:#}"))
        } else {
            Self::Internal(err.to_string())
        }
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and returns the matching user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if either field is empty or
    /// the pair does not match a stored account.
    async fn login(&self, username: &str, password: &str) -> Result<User, AuthError>;

    /// Resolves a session's user id. A stale id resolves to `None`.
    async fn current_user(&self, user_id: i32) -> Result<Option<User>, AuthError>;

    /// The account whose watchlist this is, shown to anonymous visitors.
    async fn site_owner(&self) -> Result<Option<User>, AuthError>;

    /// Changes the display name of the given user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] if the name is empty or too long.
    async fn update_name(&self, user_id: i32, name: &str) -> Result<User, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_store_errors_are_classified() {
        let db: anyhow::Result<()> =
            Err(sea_orm::DbErr::RecordNotUpdated).context("Failed to update user");
        assert!(matches!(AuthError::from(db.unwrap_err()), AuthError::Database(_)));

        let other = AuthError::from(anyhow::anyhow!("hashing task panicked"));
        assert!(matches!(other, AuthError::Internal(_)));
    }
}
