//! API error types with JSON responses.
//!
//! Every user-visible failure is one of three kinds: the request was
//! malformed (400), a required model slot is unavailable (503), or
//! something unexpected broke (500). The response body is always
//! `{"error": <message>}` — no stack traces, no internal paths.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::inference::{InferenceError, ModelId, UnavailableReason};
use crate::ingest::IngestError;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    ModelUnavailable(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// 503 for a registry slot holding no model.
    pub fn model_unavailable(id: ModelId, reason: &UnavailableReason) -> Self {
        ApiError::ModelUnavailable(format!("{} model not available: {reason}", id.as_str()))
    }

    /// 400 listing the canonical columns a prediction upload lacks.
    pub fn missing_columns(missing: &[String]) -> Self {
        ApiError::BadRequest(format!("Missing required columns: {missing:?}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(detail) => {
                tracing::error!(detail, "internal API error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        // Everything ingestion rejects is the uploader's input.
        ApiError::BadRequest(err.to_string())
    }
}

impl From<InferenceError> for ApiError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::FeatureMismatch { .. } => ApiError::BadRequest(err.to_string()),
            InferenceError::Backend(_) => {
                ApiError::Internal(format!("prediction failed: {err}"))
            }
        }
    }
}
