//! Shared types and models for the Fertilizer Manager
//!
//! This crate contains the record shapes persisted by the backend, the raw
//! form types submitted by a view layer, and the coercion and validation
//! rules that turn one into the other.

pub mod models;
pub mod parse;
pub mod types;
pub mod validation;

pub use models::*;
pub use parse::*;
pub use types::*;
pub use validation::*;
