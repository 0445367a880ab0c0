//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic randomness and opaque token generation
//! - Password hashing (Argon2id)
//! - Bearer `Authorization` header parsing
//! - Key-value cache with per-entry TTL
//! - Detached background task execution

pub mod bearer;
pub mod cache;
pub mod crypto;
pub mod password;
pub mod task;
