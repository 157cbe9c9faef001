//! Endpoint handlers, grouped by surface.

pub mod fisheries;
pub mod health;
pub mod ocean;
pub mod predict;

use axum::extract::Multipart;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::error::ApiError;

/// `{summary, sample}` payload shared by the summary endpoints.
#[derive(Serialize)]
pub struct SummaryResponse<S: Serialize> {
    pub summary: S,
    pub sample: Vec<Map<String, Value>>,
}

/// Pull the `file` field out of a multipart upload.
///
/// Returns `None` when the request carries no usable file — browsers
/// submit an empty-filename part when the picker was left blank, which
/// counts as no upload.
pub(crate) async fn file_field(
    multipart: &mut Multipart,
) -> Result<Option<(String, Vec<u8>)>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart upload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            continue;
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Could not read upload: {e}")))?;
        return Ok(Some((filename, bytes.to_vec())));
    }
    Ok(None)
}
