//! Infrastructure Layer

pub mod contact_store;
