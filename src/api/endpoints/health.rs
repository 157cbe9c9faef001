//! Service banner.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::config;
use crate::inference::registry::ModelStatus;

#[derive(Serialize)]
pub struct Banner {
    pub service: &'static str,
    pub version: &'static str,
    pub started_at: String,
    pub models: Vec<ModelStatus>,
}

/// `GET /` — service identity and per-model availability.
pub async fn banner(State(ctx): State<ApiContext>) -> Json<Banner> {
    Json(Banner {
        service: config::APP_NAME,
        version: config::APP_VERSION,
        started_at: ctx.core.started_at.clone(),
        models: ctx.core.registry.statuses(),
    })
}
