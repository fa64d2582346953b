//! Infrastructure layer: storage adapters behind domain-facing traits.

pub mod read_model;
