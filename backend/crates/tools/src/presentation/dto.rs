//! API DTOs

use serde::{Deserialize, Serialize};

// ============================================================================
// Calculator
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CalcQuery {
    pub a: f64,
    pub b: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalcResponse {
    pub result: f64,
}

// ============================================================================
// Expression
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentRequest {
    pub a: f64,
    pub op: String,
    pub b: f64,
    #[serde(default)]
    pub join_op: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FullExpressionRequest {
    pub expr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpressionResponse {
    pub expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResponse {
    pub expression: String,
    pub result: f64,
}

// ============================================================================
// Contact
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSavedResponse {
    pub message: String,
    pub filename: String,
}
