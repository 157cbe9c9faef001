pub mod api;
pub mod config;
pub mod core_state;
pub mod inference;
pub mod ingest;
pub mod pipeline;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Initialize tracing, load the model registry, and serve the API until
/// shutdown.
pub async fn run() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let core = Arc::new(core_state::CoreState::load());
    api::server::serve(core, config::bind_addr()).await
}
