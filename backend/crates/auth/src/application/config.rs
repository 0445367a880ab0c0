//! Application Configuration
//!
//! Configuration for the Auth application layer.

use platform::password::HashCost;

/// Auth application configuration
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Argon2id work factor for new hashes
    pub hash_cost: HashCost,
}

impl AuthConfig {
    /// Cheap hashing, no pepper. For tests and local tooling.
    pub fn development() -> Self {
        Self {
            password_pepper: None,
            hash_cost: HashCost::Fast,
        }
    }

    pub fn with_pepper(mut self, pepper: Vec<u8>) -> Self {
        self.password_pepper = Some(pepper);
        self
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
