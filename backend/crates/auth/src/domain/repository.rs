//! Repository Traits
//!
//! Interfaces for persistence and token bookkeeping. Implementations are in
//! the infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::{access_token::AccessToken, user_name::UserName};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user.
    ///
    /// Fails with `AuthError::UsernameTaken` when the name already exists,
    /// including when a concurrent insert wins the race.
    async fn create(&self, user: NewUser) -> AuthResult<User>;

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>>;

    /// Exact, case-sensitive match
    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<User>>;
}

/// Token → user binding.
///
/// A token is bound to exactly one user for its whole life. There is no
/// expiry: tokens die on `revoke` or when the store is dropped.
#[trait_variant::make(TokenStore: Send)]
pub trait LocalTokenStore {
    /// Mint a fresh token bound to `user_id`. Never overwrites an existing
    /// binding.
    async fn issue(&self, user_id: UserId) -> AuthResult<AccessToken>;

    /// `None` for tokens never issued or already revoked.
    async fn resolve(&self, token: &AccessToken) -> AuthResult<Option<UserId>>;

    /// Idempotent. Unknown tokens are a no-op.
    async fn revoke(&self, token: &AccessToken) -> AuthResult<()>;

    async fn active_count(&self) -> AuthResult<usize>;
}
