//! Application Layer
//!
//! Use cases over the student repository and the read cache.

pub mod bulk;
pub mod config;
pub mod manage;
pub mod query;

// Re-exports
pub use bulk::BulkStudentsUseCase;
pub use config::{StudentConfig, WriteInvalidation};
pub use manage::ManageStudentUseCase;
pub use query::QueryStudentsUseCase;
