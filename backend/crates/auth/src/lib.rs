//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and token store traits
//! - `application/` - Use cases (register, login, logout, token check)
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router, bearer guard
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional application pepper
//! - Opaque random bearer tokens held in process memory only
//! - No token TTL: a token lives until logout or process restart
//! - Login failures never reveal which half of the credential pair was wrong

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::entity::user::{CurrentUser, User};
pub use error::{AuthError, AuthResult};
pub use infra::{memory::MemoryAuthRepository, memory::MemoryTokenStore, postgres::PgAuthRepository};
pub use domain::repository::{TokenStore, UserRepository};
pub use presentation::handlers::AuthAppState;
pub use presentation::middleware::require_bearer_auth;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
