//! Oceanographic data endpoints.
//!
//! `POST /api/ocean/records` — normalize an upload (or a generated
//! dataset when no file is sent) and return canonical records.
//! `POST /api/ocean/summary` — normalize a required upload and return
//! scalar summaries plus a row preview.

use axum::extract::Multipart;
use axum::Json;
use serde_json::{Map, Value};

use crate::api::endpoints::{file_field, SummaryResponse};
use crate::api::error::ApiError;
use crate::config;
use crate::ingest;
use crate::pipeline::summary::OceanSummary;
use crate::pipeline::{normalize, sample, Impute, Table, OCEAN};

/// `POST /api/ocean/records` — canonical record list.
///
/// Cleaning here is for display, so remaining nulls in numeric fields
/// are mean-imputed (contrast with the zero-fill in `predict`).
pub async fn records(
    multipart: Option<Multipart>,
) -> Result<Json<Vec<Map<String, Value>>>, ApiError> {
    let mut table = uploaded_or_sample(multipart).await?;
    normalize(&mut table, &OCEAN, Impute::Mean);
    Ok(Json(table.records()))
}

/// `POST /api/ocean/summary` — scalar summaries and a preview.
pub async fn summary(
    multipart: Option<Multipart>,
) -> Result<Json<SummaryResponse<OceanSummary>>, ApiError> {
    let mut multipart =
        multipart.ok_or_else(|| ApiError::BadRequest("No file uploaded.".into()))?;
    let (filename, bytes) = file_field(&mut multipart)
        .await?
        .ok_or_else(|| ApiError::BadRequest("No file uploaded.".into()))?;

    let mut table = ingest::read_table(&filename, &bytes)?;
    normalize(&mut table, &OCEAN, Impute::None);

    Ok(Json(SummaryResponse {
        summary: OceanSummary::compute(&table),
        sample: table.head(config::SUMMARY_PREVIEW_ROWS),
    }))
}

async fn uploaded_or_sample(multipart: Option<Multipart>) -> Result<Table, ApiError> {
    if let Some(mut multipart) = multipart {
        if let Some((filename, bytes)) = file_field(&mut multipart).await? {
            return Ok(ingest::read_table(&filename, &bytes)?);
        }
    }
    Ok(sample::ocean(config::SAMPLE_DATASET_ROWS))
}
