//! API DTOs
//!
//! Student endpoints take their inputs as query parameters.

use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentQuery {
    pub name: String,
    pub faculty: String,
    pub course: String,
    pub grade: f64,
}

/// Every field optional; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStudentQuery {
    pub name: Option<String>,
    pub faculty: Option<String>,
    pub course: Option<String>,
    pub grade: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FacultyQuery {
    pub faculty: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LowGradeQuery {
    pub course: String,
    /// Defaults to 30
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CsvPathQuery {
    pub csv_path: String,
}

/// `?ids=1&ids=2`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteIdsQuery {
    #[serde(default)]
    pub ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Pre-serialized JSON body, as stored in the read cache.
#[derive(Debug, Clone)]
pub struct JsonBody(pub String);

impl IntoResponse for JsonBody {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "application/json")], self.0).into_response()
    }
}
