//! `SeaORM` implementation of the `AuthService` trait.

use crate::db::Store;
use crate::models::User;
use crate::services::auth_service::{AuthError, AuthService};
use crate::services::validation::validate_display_name;
use async_trait::async_trait;
use tracing::{info, warn};

pub struct SeaOrmAuthService {
    store: Store,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        match self.store.verify_user_password(username, password).await? {
            Some(user) => {
                info!(user_id = user.id, "Login succeeded");
                Ok(user)
            }
            None => {
                warn!(username, "Login failed");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    async fn current_user(&self, user_id: i32) -> Result<Option<User>, AuthError> {
        Ok(self.store.get_user(user_id).await?)
    }

    async fn site_owner(&self) -> Result<Option<User>, AuthError> {
        Ok(self.store.first_user().await?)
    }

    async fn update_name(&self, user_id: i32, name: &str) -> Result<User, AuthError> {
        let name = validate_display_name(name).map_err(AuthError::Validation)?;

        let user = self
            .store
            .update_user_name(user_id, &name)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        info!(user_id, "Display name updated");
        Ok(user)
    }
}
