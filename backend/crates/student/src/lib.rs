//! Student Records Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Student entity, repository trait, cache keys
//! - `application/` - Cached reads, single-row writes, bulk jobs
//! - `infra/` - PostgreSQL and in-memory repositories, CSV source
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Cache Coherence
//! - Reads go through the cache; a miss loads from the repository and
//!   stores the serialized body for `cache_ttl`
//! - Update and delete evict `student_id:<id>`, or every view under
//!   `WriteInvalidation::FlushAll`
//! - CSV import and bulk delete always flush every view
//! - Cache failures are logged and never fail a request

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::{StudentConfig, WriteInvalidation};
pub use domain::entity::{NewStudent, Student, StudentPatch};
pub use domain::repository::StudentRepository;
pub use error::{StudentError, StudentResult};
pub use infra::{memory::MemoryStudentRepository, postgres::PgStudentRepository};
pub use presentation::handlers::StudentAppState;
pub use presentation::router::student_router;
