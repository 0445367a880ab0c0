//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::StudentAppState;
pub use router::student_router;
