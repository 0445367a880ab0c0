//! API Server Library
//!
//! Router composition and process configuration, shared by the binary and
//! the end-to-end tests.

pub mod app;
pub mod config;

pub use app::{build_app, build_router, cors_layer};
pub use config::{AppConfig, ConfigError};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
