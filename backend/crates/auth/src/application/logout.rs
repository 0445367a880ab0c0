//! Logout Use Case
//!
//! Revokes a bearer token.

use std::sync::Arc;

use crate::domain::repository::TokenStore;
use crate::domain::value_object::access_token::AccessToken;
use crate::error::AuthResult;

pub struct LogoutUseCase<T>
where
    T: TokenStore,
{
    token_store: Arc<T>,
}

impl<T> LogoutUseCase<T>
where
    T: TokenStore,
{
    pub fn new(token_store: Arc<T>) -> Self {
        Self { token_store }
    }

    /// Revoke unconditionally. Unknown or already revoked tokens succeed.
    pub async fn execute(&self, token: &AccessToken) -> AuthResult<()> {
        self.token_store.revoke(token).await?;
        tracing::info!("User logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::MemoryTokenStore;
    use kernel::id::UserId;

    #[tokio::test]
    async fn test_logout_revokes_and_is_idempotent() {
        let tokens = Arc::new(MemoryTokenStore::new());
        let token = tokens.issue(UserId::from_i64(1)).await.unwrap();
        let uc = LogoutUseCase::new(tokens.clone());

        uc.execute(&token).await.unwrap();
        assert_eq!(tokens.resolve(&token).await.unwrap(), None);

        uc.execute(&token).await.unwrap();
        uc.execute(&AccessToken::from_presented("never-issued")).await.unwrap();
    }
}
