//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::ToolsAppState;
pub use router::tools_router;
