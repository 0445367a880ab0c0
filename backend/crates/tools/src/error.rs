//! Tool Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::expression::EvalError;

pub type ToolResult<T> = Result<T, ToolError>;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Division by zero")]
    ZeroDivision,

    #[error("Operator must be one of '+', '-', '*', '/', got {0:?}")]
    InvalidOperator(String),

    #[error("Expression is not set")]
    ExpressionNotSet,

    #[error("Expression is longer than {max} characters")]
    ExpressionTooLong { max: usize },

    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// Every failed field rule, in field order
    #[error("Invalid contact: {}", .0.join("; "))]
    InvalidContact(Vec<String>),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<EvalError> for ToolError {
    fn from(err: EvalError) -> Self {
        match err {
            EvalError::DivisionByZero => ToolError::ZeroDivision,
            other => ToolError::Evaluation(other.to_string()),
        }
    }
}

impl ToolError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ToolError::ZeroDivision
            | ToolError::InvalidOperator(_)
            | ToolError::ExpressionNotSet
            | ToolError::ExpressionTooLong { .. }
            | ToolError::Evaluation(_) => ErrorKind::BadRequest,
            ToolError::InvalidContact(_) => ErrorKind::UnprocessableEntity,
            ToolError::Storage(_) | ToolError::Serialization(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn code(&self) -> Option<&'static str> {
        match self {
            ToolError::ZeroDivision => Some("zero_division"),
            ToolError::InvalidOperator(_) => Some("invalid_operator"),
            ToolError::ExpressionNotSet => Some("expression_not_set"),
            ToolError::ExpressionTooLong { .. } => Some("expression_too_long"),
            ToolError::Evaluation(_) => Some("evaluation_failed"),
            ToolError::InvalidContact(_) => Some("invalid_contact"),
            _ => None,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        let message = if self.kind().is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        let err = AppError::new(self.kind(), message);
        match self.code() {
            Some(code) => err.with_code(code),
            None => err,
        }
    }

    fn log(&self) {
        match self {
            ToolError::Storage(e) => tracing::error!(error = %e, "Contact storage failed"),
            ToolError::Serialization(e) => tracing::error!(error = %e, "Contact encoding failed"),
            _ => tracing::debug!(error = %self, "Tool request rejected"),
        }
    }
}

impl IntoResponse for ToolError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<ToolError> for AppError {
    fn from(err: ToolError) -> Self {
        err.log();
        err.to_app_error()
    }
}
