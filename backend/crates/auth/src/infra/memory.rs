//! In-Memory Implementations
//!
//! [`MemoryTokenStore`] is the production token store. [`MemoryAuthRepository`]
//! backs users when no database is configured, and in tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use kernel::id::UserId;
use tokio::sync::RwLock;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::{TokenStore, UserRepository};
use crate::domain::value_object::{access_token::AccessToken, user_name::UserName};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Token store
// ============================================================================

/// Process-wide token map. Cloning shares the same map.
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    tokens: Arc<RwLock<HashMap<AccessToken, UserId>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    async fn issue(&self, user_id: UserId) -> AuthResult<AccessToken> {
        let mut tokens = self.tokens.write().await;
        let token = loop {
            let candidate = AccessToken::generate();
            if !tokens.contains_key(&candidate) {
                break candidate;
            }
            tracing::warn!("Generated token collided with a live token, retrying");
        };
        tokens.insert(token.clone(), user_id);
        Ok(token)
    }

    async fn resolve(&self, token: &AccessToken) -> AuthResult<Option<UserId>> {
        Ok(self.tokens.read().await.get(token).copied())
    }

    async fn revoke(&self, token: &AccessToken) -> AuthResult<()> {
        self.tokens.write().await.remove(token);
        Ok(())
    }

    async fn active_count(&self) -> AuthResult<usize> {
        Ok(self.tokens.read().await.len())
    }
}

// ============================================================================
// User repository
// ============================================================================

#[derive(Default)]
struct UserTable {
    by_id: HashMap<UserId, User>,
    by_name: HashMap<UserName, UserId>,
}

/// In-memory user store with sequential ids starting at 1.
#[derive(Clone)]
pub struct MemoryAuthRepository {
    table: Arc<RwLock<UserTable>>,
    next_id: Arc<AtomicI64>,
}

impl Default for MemoryAuthRepository {
    fn default() -> Self {
        Self {
            table: Arc::default(),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop a user record. Used to exercise the vanished-user path.
    pub async fn remove(&self, id: UserId) -> Option<User> {
        let mut table = self.table.write().await;
        let user = table.by_id.remove(&id)?;
        table.by_name.remove(&user.username);
        Some(user)
    }
}

impl UserRepository for MemoryAuthRepository {
    async fn create(&self, user: NewUser) -> AuthResult<User> {
        let mut table = self.table.write().await;
        if table.by_name.contains_key(&user.username) {
            return Err(AuthError::UsernameTaken);
        }

        let id = UserId::from_i64(self.next_id.fetch_add(1, Ordering::Relaxed));
        let user = user.into_user(id, Utc::now());
        table.by_name.insert(user.username.clone(), id);
        table.by_id.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        Ok(self.table.read().await.by_id.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table
            .by_name
            .get(username)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }
}
