//! Utility Endpoints
//!
//! - `domain/` - Arithmetic operators, expression evaluator, contact forms
//! - `application/` - Per-session expressions, contact submission
//! - `infra/` - JSON file storage for contact forms
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! None of these routes require authentication.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

pub use config::ToolsConfig;
pub use error::{ToolError, ToolResult};
pub use domain::repository::ContactStore;
pub use infra::contact_store::JsonFileContactStore;
pub use presentation::handlers::ToolsAppState;
pub use presentation::router::tools_router;
