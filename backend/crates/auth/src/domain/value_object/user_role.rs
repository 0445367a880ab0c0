use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    User,
    ReadOnly,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role code {0:?}, expected one of: user, read_only, admin")]
pub struct UnknownRole(pub String);

impl UserRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            User => "user",
            ReadOnly => "read_only",
            Admin => "admin",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, UnknownRole> {
        use UserRole::*;
        match code {
            "user" => Ok(User),
            "read_only" => Ok(ReadOnly),
            "admin" => Ok(Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
