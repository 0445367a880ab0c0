//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    user_name::UserName, user_password::UserPassword, user_role::UserRole,
};

/// Stored user. Never deleted by the service.
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identifier
    pub id: UserId,
    /// Unique, immutable, case-sensitive
    pub username: UserName,
    pub password_hash: UserPassword,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// A user not yet persisted. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: UserName,
    pub password_hash: UserPassword,
    pub role: UserRole,
}

impl NewUser {
    /// Attach a store-assigned id.
    pub fn into_user(self, id: UserId, created_at: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            password_hash: self.password_hash,
            role: self.role,
            created_at,
        }
    }
}

/// The authenticated caller, placed in request extensions by the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: UserName,
    pub role: UserRole,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }
}
