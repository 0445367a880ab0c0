//! Infrastructure Layer
//!
//! Database and in-process implementations.

pub mod memory;
pub mod postgres;
