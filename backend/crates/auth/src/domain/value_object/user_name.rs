//! User Name Value Object
//!
//! ユーザー名は、ログインに使用する**識別子（ハンドル）**。
//!
//! ## 設計方針
//! - 正規化・小文字化は行わない（保存値は入力値そのもの）
//! - 照合は完全一致・大文字小文字を区別
//!
//! ## 不変条件
//! - 長さ: 1〜[`USER_NAME_MAX_LENGTH`]文字
//! - 空白のみは禁止
//! - 制御文字は禁止

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for user name (in characters), matching the column width
pub const USER_NAME_MAX_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    Empty,
    TooLong { length: usize, max: usize },
    ControlCharacter { position: usize },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "User name cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "User name is too long ({length} chars, maximum {max})")
            }
            Self::ControlCharacter { position } => {
                write!(f, "User name contains a control character at position {position}")
            }
        }
    }
}

impl std::error::Error for UserNameError {}

/// Validated user name
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    pub fn new(input: impl Into<String>) -> Result<Self, UserNameError> {
        let value = input.into();
        Self::validate(&value)?;
        Ok(Self(value))
    }

    /// Rebuild from a stored row. The value was validated on insert.
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(value: &str) -> Result<(), UserNameError> {
        if value.trim().is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = value.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if let Some(position) = value.chars().position(char::is_control) {
            return Err(UserNameError::ControlCharacter { position });
        }

        Ok(())
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}
