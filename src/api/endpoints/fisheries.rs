//! Fisheries data endpoints.
//!
//! Mirrors the ocean surface over the fisheries schema. The records
//! endpoint additionally attaches simulated environmental columns,
//! standing in for a join against co-located ocean sensor data.

use axum::extract::Multipart;
use axum::Json;
use serde_json::{Map, Value};

use crate::api::endpoints::{file_field, SummaryResponse};
use crate::api::error::ApiError;
use crate::config;
use crate::ingest;
use crate::pipeline::summary::FisheriesSummary;
use crate::pipeline::{normalize, sample, Impute, Table, FISHERIES};

/// `POST /api/fisheries/records` — canonical record list with the
/// simulated environmental join.
pub async fn records(
    multipart: Option<Multipart>,
) -> Result<Json<Vec<Map<String, Value>>>, ApiError> {
    let mut table = uploaded_or_sample(multipart).await?;
    normalize(&mut table, &FISHERIES, Impute::Mean);
    sample::attach_environmental(&mut table);
    Ok(Json(table.records()))
}

/// `POST /api/fisheries/summary` — scalar summaries and a preview.
pub async fn summary(
    multipart: Option<Multipart>,
) -> Result<Json<SummaryResponse<FisheriesSummary>>, ApiError> {
    let mut multipart =
        multipart.ok_or_else(|| ApiError::BadRequest("No file uploaded.".into()))?;
    let (filename, bytes) = file_field(&mut multipart)
        .await?
        .ok_or_else(|| ApiError::BadRequest("No file uploaded.".into()))?;

    let mut table = ingest::read_table(&filename, &bytes)?;
    normalize(&mut table, &FISHERIES, Impute::None);

    Ok(Json(SummaryResponse {
        summary: FisheriesSummary::compute(&table),
        sample: table.head(config::SUMMARY_PREVIEW_ROWS),
    }))
}

async fn uploaded_or_sample(multipart: Option<Multipart>) -> Result<Table, ApiError> {
    if let Some(mut multipart) = multipart {
        if let Some((filename, bytes)) = file_field(&mut multipart).await? {
            return Ok(ingest::read_table(&filename, &bytes)?);
        }
    }
    Ok(sample::fisheries(config::SAMPLE_DATASET_ROWS))
}
