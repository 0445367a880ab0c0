//! Login Use Case
//!
//! Verifies credentials and issues a bearer token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{TokenStore, UserRepository};
use crate::domain::value_object::{
    access_token::AccessToken, user_name::UserName, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub access_token: AccessToken,
}

pub struct LoginUseCase<U, T>
where
    U: UserRepository,
    T: TokenStore,
{
    user_repo: Arc<U>,
    token_store: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, T> LoginUseCase<U, T>
where
    U: UserRepository,
    T: TokenStore,
{
    pub fn new(user_repo: Arc<U>, token_store: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            token_store,
            config,
        }
    }

    /// Every failure before the token is issued is `InvalidCredentials`.
    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let username =
            UserName::new(input.username).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_username(&username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // A string that could never have been registered cannot match
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !user
            .password_hash
            .verify(&raw_password, self.config.pepper())
        {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.token_store.issue(user.id).await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutput { access_token })
    }
}
