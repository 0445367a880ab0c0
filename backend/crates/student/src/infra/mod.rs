//! Infrastructure Layer

pub mod csv_source;
pub mod memory;
pub mod postgres;
