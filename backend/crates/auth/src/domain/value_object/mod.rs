//! Value Object Module

pub mod access_token;
pub mod user_name;
pub mod user_password;
pub mod user_role;
