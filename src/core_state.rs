//! Shared application state.
//!
//! `CoreState` is built once during startup and handed to the HTTP
//! layer inside an `Arc`. The model registry it carries is an immutable
//! snapshot: populated before the server accepts its first request and
//! never written again, so concurrent handlers read it without locking.

use chrono::Utc;

use crate::config;
use crate::inference::ModelRegistry;

pub struct CoreState {
    pub registry: ModelRegistry,
    /// RFC 3339 timestamp of process start, reported by the banner.
    pub started_at: String,
}

impl CoreState {
    /// Load state from the configured environment: attempts every model
    /// slot under [`config::model_dir`]. Never fails — absent models are
    /// recorded as unavailable.
    pub fn load() -> Self {
        let model_dir = config::model_dir();
        tracing::info!(dir = %model_dir.display(), "loading model registry");
        Self::with_registry(ModelRegistry::load(&model_dir))
    }

    /// Build state around an explicit registry (tests, embedders).
    pub fn with_registry(registry: ModelRegistry) -> Self {
        Self {
            registry,
            started_at: Utc::now().to_rfc3339(),
        }
    }
}
