//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

pub struct RegisterInput {
    pub username: String,
    pub password: String,
    /// Role code; `None` means `"user"`
    pub role: Option<String>,
}

pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<User> {
        let username =
            UserName::new(input.username).map_err(|e| AuthError::InvalidUsername(e.to_string()))?;

        let role = match input.role.as_deref() {
            None => UserRole::default(),
            Some(code) => {
                UserRole::from_code(code).map_err(|e| AuthError::InvalidRole(e.to_string()))?
            }
        };

        // Fast path; the store's unique constraint still guards the race
        if self.user_repo.find_by_username(&username).await?.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        let raw_password = RawPassword::new(input.password)?;
        let password_hash =
            UserPassword::from_raw(&raw_password, self.config.pepper(), self.config.hash_cost)?;

        let user = self
            .user_repo
            .create(NewUser {
                username,
                password_hash,
                role,
            })
            .await?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            role = %user.role,
            "User registered"
        );

        Ok(user)
    }
}
