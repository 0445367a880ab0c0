//! Domain Layer
//!
//! Arithmetic operators, the expression evaluator, contact forms, and the
//! contact storage trait.

pub mod contact;
pub mod expression;
pub mod operator;
pub mod repository;

pub use operator::BinaryOp;
