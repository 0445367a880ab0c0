//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username already taken")]
    UsernameTaken,

    /// Unknown user or wrong password. Deliberately indistinguishable.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// `Authorization` header absent or not `Bearer <token>`
    #[error("Missing or invalid token")]
    MissingToken,

    /// Token never issued or already revoked
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Token resolves but the user record is gone
    #[error("User not found")]
    UserVanished,

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Password validation failed: {0}")]
    PasswordValidation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UsernameTaken
            | AuthError::InvalidUsername(_)
            | AuthError::InvalidRole(_)
            | AuthError::PasswordValidation(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::UserVanished => ErrorKind::Unauthorized,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Machine readable code for the guard rejections.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            AuthError::MissingToken => Some("missing_token"),
            AuthError::InvalidToken => Some("invalid_token"),
            AuthError::UserVanished => Some("user_not_found"),
            AuthError::UsernameTaken => Some("username_taken"),
            AuthError::InvalidCredentials => Some("invalid_credentials"),
            _ => None,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        // Storage details stay in the logs
        let message = match self {
            AuthError::Database(_) | AuthError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        let err = AppError::new(self.kind(), message);
        match self.code() {
            Some(code) => err.with_code(code),
            None => err,
        }
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::UserVanished => {
                tracing::warn!("Token resolved to a missing user");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.log();
        err.to_app_error()
    }
}
