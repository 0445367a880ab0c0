//! Domain Layer
//!
//! Student entity, repository trait, and cache key scheme.

pub mod cache_key;
pub mod entity;
pub mod repository;

pub use cache_key::CacheKey;
pub use entity::{NewStudent, Student, StudentPatch};
pub use repository::StudentRepository;
