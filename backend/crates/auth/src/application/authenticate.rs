//! Authenticate Use Case
//!
//! Resolves a presented bearer token to the calling user.

use std::sync::Arc;

use crate::domain::entity::user::CurrentUser;
use crate::domain::repository::{TokenStore, UserRepository};
use crate::domain::value_object::access_token::AccessToken;
use crate::error::{AuthError, AuthResult};

pub struct AuthenticateUseCase<U, T>
where
    U: UserRepository,
    T: TokenStore,
{
    user_repo: Arc<U>,
    token_store: Arc<T>,
}

impl<U, T> AuthenticateUseCase<U, T>
where
    U: UserRepository,
    T: TokenStore,
{
    pub fn new(user_repo: Arc<U>, token_store: Arc<T>) -> Self {
        Self {
            user_repo,
            token_store,
        }
    }

    /// `None` token means the header was missing or malformed.
    pub async fn execute(&self, token: Option<AccessToken>) -> AuthResult<CurrentUser> {
        let token = token.ok_or(AuthError::MissingToken)?;

        let user_id = self
            .token_store
            .resolve(&token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserVanished)?;

        Ok(CurrentUser::from(&user))
    }
}
