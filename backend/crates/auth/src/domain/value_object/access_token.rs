//! Access Token Value Object
//!
//! Opaque bearer credential. The value is secret: `Debug` prints only a
//! short prefix, and there is no `Display` so it cannot be interpolated into
//! log lines by accident.

use std::fmt;

use platform::crypto::generate_token;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

impl AccessToken {
    /// Fresh random token (32 lowercase hex characters).
    pub fn generate() -> Self {
        Self(generate_token())
    }

    /// Wrap a token presented by a client.
    pub fn from_presented(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(4).collect();
        write!(f, "AccessToken({prefix}…)")
    }
}
