//! Student Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::StudentId;
use thiserror::Error;

pub type StudentResult<T> = Result<T, StudentError>;

#[derive(Debug, Error)]
pub enum StudentError {
    #[error("Student not found")]
    NotFound(StudentId),

    /// Field or query parameter rejected before reaching the store
    #[error("{0}")]
    Validation(String),

    /// CSV file could not be read at all
    #[error("Cannot read CSV file {path}: {reason}")]
    CsvFile { path: String, reason: String },

    /// 1-based data row, header excluded
    #[error("CSV row {row}: {reason}")]
    CsvRow { row: u64, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StudentError {
    pub fn validation(message: impl Into<String>) -> Self {
        StudentError::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StudentError::NotFound(_) => ErrorKind::NotFound,
            StudentError::Validation(_)
            | StudentError::CsvFile { .. }
            | StudentError::CsvRow { .. } => ErrorKind::BadRequest,
            StudentError::Database(_)
            | StudentError::Serialization(_)
            | StudentError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn code(&self) -> Option<&'static str> {
        match self {
            StudentError::NotFound(_) => Some("student_not_found"),
            StudentError::Validation(_) => Some("validation_error"),
            StudentError::CsvFile { .. } | StudentError::CsvRow { .. } => Some("csv_import_failed"),
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
            StudentError::Database(e) => {
                tracing::error!(error = %e, "Student database error");
            }
            StudentError::Serialization(e) => {
                tracing::error!(error = %e, "Student serialization error");
            }
            StudentError::Internal(msg) => {
                tracing::error!(message = %msg, "Student internal error");
            }
            StudentError::NotFound(id) => {
                tracing::debug!(student_id = %id, "Student not found");
            }
            _ => {
                tracing::debug!(error = %self, "Student request rejected");
            }
        }
    }
}

impl IntoResponse for StudentError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<StudentError> for AppError {
    fn from(err: StudentError) -> Self {
        err.log();
        err.to_app_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            StudentError::NotFound(StudentId::from_i64(1)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            StudentError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            StudentError::CsvRow {
                row: 3,
                reason: "x".into()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            StudentError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_csv_row_message_names_row() {
        let err = StudentError::CsvRow {
            row: 2,
            reason: "grade is not a number".into(),
        };
        assert_eq!(err.to_app_error().message(), "CSV row 2: grade is not a number");
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let app = StudentError::Internal("pool exhausted".into()).to_app_error();
        assert_eq!(app.message(), "Internal server error");
        assert_eq!(app.code(), None);
    }
}
