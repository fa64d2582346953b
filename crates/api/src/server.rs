//! HTTP server bootstrap: bind, serve, and shut down gracefully.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use productd_infra::read_model::ProductStore;

use crate::app;
use crate::config::ApiConfig;

/// Serve the API until a shutdown signal arrives.
///
/// In-flight requests are drained before returning. The store is volatile, so
/// whatever it holds at that point is discarded with the process.
pub async fn run(config: ApiConfig, store: Arc<dyn ProductStore>) -> anyhow::Result<()> {
    let app = app::build_app(Arc::clone(&store));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    let addr = listener.local_addr()?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated with an error")?;

    tracing::info!(records_discarded = store.len(), "server stopped");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
