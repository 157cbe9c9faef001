//! HTTP server lifecycle.
//!
//! Pattern: bind → serve → shut down on ctrl-c. The state snapshot is
//! built by the caller before the listener accepts anything, so every
//! request observes the same registry.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::api::router::api_router;
use crate::core_state::CoreState;

/// Bind `addr` and serve the API until a shutdown signal arrives.
pub async fn serve(core: Arc<CoreState>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    tracing::info!(addr = %local, "API server listening");

    let app = api_router(core);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}
