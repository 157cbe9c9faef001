//! Prediction endpoints.
//!
//! The numeric endpoints accept either a CSV upload (batch) or a JSON
//! `{"features": [..]}` body (single row). Model invocation is CPU-bound
//! and runs on the blocking pool so one slow inference does not stall
//! unrelated requests.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use ndarray::Array2;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::endpoints::file_field;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::inference::predictor::argmax;
use crate::inference::{dispatch, ModelId, Prediction, Predictor, OCEAN_FEATURES};
use crate::ingest;
use crate::pipeline::{feature_matrix, normalize_strict, Impute, OCEAN};

#[derive(Debug, Default, Deserialize)]
struct FeaturePayload {
    features: Option<Vec<f64>>,
}

/// `POST /api/predict/ocean`
pub async fn ocean(
    State(ctx): State<ApiContext>,
    req: Request,
) -> Result<Json<Value>, ApiError> {
    numeric_prediction(ctx, ModelId::Ocean, req, true).await
}

/// `POST /api/predict/fish`
pub async fn fish(
    State(ctx): State<ApiContext>,
    req: Request,
) -> Result<Json<Value>, ApiError> {
    numeric_prediction(ctx, ModelId::Fish, req, false).await
}

/// `POST /api/predict/species` — classify one feature vector.
pub async fn species(
    State(ctx): State<ApiContext>,
    req: Request,
) -> Result<Json<Value>, ApiError> {
    let model = ctx
        .core
        .registry
        .require(ModelId::Species)
        .map_err(|r| ApiError::model_unavailable(ModelId::Species, &r))?;

    let payload = json_payload(req).await?;
    let features = payload
        .features
        .ok_or_else(|| ApiError::BadRequest("Provide 'features': [..] in JSON.".into()))?;
    let classes: Vec<String> = model
        .classes()
        .map(<[String]>::to_vec)
        .ok_or_else(|| ApiError::Internal("species model exposes no label set".into()))?;

    let x = row_matrix(features);
    let prediction = run_blocking(model, x).await?;

    let (index, confidence) = match &prediction {
        Prediction::Probabilities(p) => {
            let row = p.row(0);
            let idx = argmax(row.iter().copied());
            (idx, row[idx])
        }
        // A point-estimate classifier asserts its class outright.
        Prediction::Points(v) => (v[0] as usize, 1.0),
    };
    let label = classes
        .get(index)
        .cloned()
        .ok_or_else(|| ApiError::Internal("predicted class index out of range".into()))?;

    Ok(Json(json!({
        "predicted_species": label,
        "confidence": confidence,
    })))
}

async fn numeric_prediction(
    ctx: ApiContext,
    id: ModelId,
    req: Request,
    include_order: bool,
) -> Result<Json<Value>, ApiError> {
    let model = ctx
        .core
        .registry
        .require(id)
        .map_err(|r| ApiError::model_unavailable(id, &r))?;

    if is_multipart(&req) {
        let mut multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| ApiError::BadRequest(format!("Invalid multipart upload: {e}")))?;
        let (filename, bytes) = file_field(&mut multipart)
            .await?
            .ok_or_else(|| ApiError::BadRequest("No file uploaded.".into()))?;

        let mut table = ingest::read_table(&filename, &bytes)?;
        // Model feed: genuinely absent canonical columns must reject the
        // upload, so skip schema completion; nulls zero-fill.
        normalize_strict(&mut table, &OCEAN, Impute::Zero);
        let x = feature_matrix(&table, &OCEAN_FEATURES)
            .map_err(|missing| ApiError::missing_columns(&missing))?;

        let prediction = run_blocking(model, x).await?;
        Ok(Json(batch_payload(prediction)))
    } else {
        let payload = json_payload(req).await?;
        let features = payload.features.ok_or_else(|| {
            ApiError::BadRequest(
                "Provide 'features': [..] in JSON or upload a CSV file.".into(),
            )
        })?;

        let x = row_matrix(features);
        let prediction = run_blocking(model, x).await?;
        Ok(Json(single_payload(prediction, include_order)))
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("multipart/form-data"))
        .unwrap_or(false)
}

/// Lenient JSON body read: an empty body is an empty payload, anything
/// else must parse.
async fn json_payload(req: Request) -> Result<FeaturePayload, ApiError> {
    let bytes = Bytes::from_request(req, &())
        .await
        .map_err(|e| ApiError::BadRequest(format!("Could not read request body: {e}")))?;
    if bytes.is_empty() {
        return Ok(FeaturePayload::default());
    }
    serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))
}

fn row_matrix(features: Vec<f64>) -> Array2<f64> {
    let len = features.len();
    Array2::from_shape_vec((1, len), features).expect("1×n matrix from vec")
}

/// Dispatch on the blocking pool; inference is CPU-bound.
async fn run_blocking(
    model: Arc<dyn Predictor>,
    x: Array2<f64>,
) -> Result<Prediction, ApiError> {
    tokio::task::spawn_blocking(move || dispatch(model.as_ref(), x.view()))
        .await
        .map_err(|e| ApiError::Internal(format!("prediction task failed: {e}")))?
        .map_err(ApiError::from)
}

fn batch_payload(prediction: Prediction) -> Value {
    let count = prediction.len();
    let predictions = match prediction {
        Prediction::Points(v) => json!(v.to_vec()),
        Prediction::Probabilities(p) => {
            let rows: Vec<Vec<f64>> = p.rows().into_iter().map(|r| r.to_vec()).collect();
            json!(rows)
        }
    };
    json!({ "predictions": predictions, "count": count })
}

fn single_payload(prediction: Prediction, include_order: bool) -> Value {
    // Rank unwrap for the 1-row case: (1,) → scalar, (1, c) → per-class
    // vector.
    let value = match &prediction {
        Prediction::Points(v) => json!(v[0]),
        Prediction::Probabilities(p) => json!(p.row(0).to_vec()),
    };
    let mut payload = json!({ "prediction": value });
    if include_order {
        payload["features_order"] = json!(OCEAN_FEATURES);
    }
    payload
}
