//! Handlers, one file per resource.
//!
//! Handlers are plain functions over the store so the dispatch table can hold
//! them as `fn` pointers; HTTP framing happens in [`crate::app::routing`].

pub mod products;
