//! HTTP API application wiring (Axum router + store injection).
//!
//! - `routing.rs`: path resolution and the `(method, shape)` dispatch table
//! - `routes/`: handlers (one file per resource)
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use productd_infra::read_model::ProductStore;

pub mod errors;
pub mod routes;
pub mod routing;

/// Build the full HTTP router (public entrypoint used by `server::run` and tests).
///
/// All requests land in the dispatch table, so paths outside `products/{id}`
/// get the JSON 404 envelope rather than axum's default.
pub fn build_app(store: Arc<dyn ProductStore>) -> Router {
    Router::new()
        .fallback(routing::dispatch)
        .layer(Extension(store))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
