//! Application Layer

pub mod contacts;
pub mod sessions;

pub use contacts::SubmitContactUseCase;
pub use sessions::{DEFAULT_SESSION, ExpressionSessions};
