//! Products domain module.
//!
//! This crate holds the product-details record and its rules, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod product;

pub use product::ProductDetails;
