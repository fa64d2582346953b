//! `productd-core` — shared domain primitives.
//!
//! This crate contains **pure domain** types (no HTTP, no storage).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::ProductId;
