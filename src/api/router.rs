//! API router.
//!
//! Returns a composable `Router` mountable on any axum server. Data
//! endpoints live under `/api/`; the root path serves the banner. CORS
//! is permissive — the dashboard frontend is served from a different
//! origin during development.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::config;
use crate::core_state::CoreState;

/// Build the API router over the shared state snapshot.
pub fn api_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);

    Router::new()
        .route("/", get(endpoints::health::banner))
        .route("/api/ocean/records", post(endpoints::ocean::records))
        .route("/api/ocean/summary", post(endpoints::ocean::summary))
        .route("/api/fisheries/records", post(endpoints::fisheries::records))
        .route(
            "/api/fisheries/summary",
            post(endpoints::fisheries::summary),
        )
        .route("/api/predict/ocean", post(endpoints::predict::ocean))
        .route("/api/predict/fish", post(endpoints::predict::fish))
        .route("/api/predict/species", post(endpoints::predict::species))
        .with_state(ctx)
        .layer(DefaultBodyLimit::max(config::MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use ndarray::array;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::inference::predictor::{LinearModel, SoftmaxClassifier};
    use crate::inference::{ModelRegistry, ModelSlot, UnavailableReason};

    // ── Test fixtures ───────────────────────────────────────

    fn missing_slot() -> ModelSlot {
        ModelSlot::Unavailable(UnavailableReason::ArtifactMissing(
            "models/none.json".into(),
        ))
    }

    /// State with every model slot empty.
    fn bare_state() -> Arc<CoreState> {
        Arc::new(CoreState::with_registry(ModelRegistry::with_slots(
            missing_slot(),
            missing_slot(),
            missing_slot(),
        )))
    }

    /// State with deterministic fitted models in every slot.
    fn fitted_state() -> Arc<CoreState> {
        let ocean = ModelSlot::Ready(Arc::new(LinearModel::new(
            1.0,
            vec![0.1, 0.2, 0.3, 0.4, 0.5],
        )));
        let fish = ModelSlot::Ready(Arc::new(LinearModel::new(0.0, vec![1.0; 5])));
        let species = ModelSlot::Ready(Arc::new(SoftmaxClassifier::new(
            config::SPECIES_LABELS.iter().map(|s| s.to_string()).collect(),
            vec![0.0, 0.0, 0.0],
            array![
                [1.0, 0.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0, 0.0]
            ],
        )));
        Arc::new(CoreState::with_registry(ModelRegistry::with_slots(
            ocean, fish, species,
        )))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(uri: &str, payload: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    fn empty_post(uri: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn multipart_request(uri: &str, filename: &str, content: &str) -> Request<Body> {
        let boundary = "pelagia-test-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: text/csv\r\n\r\n\
             {content}\r\n\
             --{boundary}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    const OCEAN_CSV: &str = "Sampling Date,Temp,Salinity,DO mg/L,pH,Depth (m)\n\
                             2023-01-05,18.2,33.1,7.4,8.1,12\n\
                             2023-01-06,19.0,33.4,7.1,8.0,15\n";

    // ── Banner ──────────────────────────────────────────────

    #[tokio::test]
    async fn banner_reports_unavailable_models() {
        let app = api_router(bare_state());
        let response = app.oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["service"], "Pelagia");
        let models = json["models"].as_array().unwrap();
        assert_eq!(models.len(), 3);
        assert!(models.iter().all(|m| m["available"] == json!(false)));
        assert!(models.iter().all(|m| m["reason"].is_string()));
    }

    // ── Records endpoints ───────────────────────────────────

    #[tokio::test]
    async fn ocean_records_without_file_serves_generated_data() {
        let app = api_router(bare_state());
        let response = app
            .oneshot(empty_post("/api/ocean/records"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let records = json.as_array().unwrap();
        assert_eq!(records.len(), 100);
        assert!(records[0]["temperature_C"].is_number());
        assert!(records[0]["pH"].is_number());
    }

    #[tokio::test]
    async fn ocean_records_normalizes_messy_headers() {
        let app = api_router(bare_state());
        let response = app
            .oneshot(multipart_request("/api/ocean/records", "survey.csv", OCEAN_CSV))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let rec = &json.as_array().unwrap()[0];
        assert_eq!(rec["date"], json!("2023-01-05"));
        assert_eq!(rec["temperature_C"], json!(18.2));
        assert_eq!(rec["salinity_PSU"], json!(33.1));
        assert_eq!(rec["oxygen_mgL"], json!(7.4));
        assert_eq!(rec["pH"], json!(8.1));
        assert_eq!(rec["depth_m"], json!(12.0));
        for absent in ["lat", "lon", "sample_id", "time"] {
            assert!(rec[absent].is_null(), "{absent} should be null");
        }
    }

    #[tokio::test]
    async fn fisheries_records_attach_environmental_columns() {
        let app = api_router(bare_state());
        let response = app
            .oneshot(empty_post("/api/fisheries/records"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let rec = &json.as_array().unwrap()[0];
        assert!(rec["species_scientific"].is_string());
        assert!(rec["temperature_C"].is_number());
        assert!(rec["salinity_PSU"].is_number());
    }

    // ── Summary endpoints ───────────────────────────────────

    #[tokio::test]
    async fn ocean_summary_requires_a_file() {
        let app = api_router(bare_state());
        let response = app
            .oneshot(empty_post("/api/ocean/summary"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"], json!("No file uploaded."));
    }

    #[tokio::test]
    async fn ocean_summary_computes_scalars() {
        let app = api_router(bare_state());
        let response = app
            .oneshot(multipart_request("/api/ocean/summary", "survey.csv", OCEAN_CSV))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["summary"]["total_samples"], json!(2));
        let avg_temp = json["summary"]["avg_temp"].as_f64().unwrap();
        assert!((avg_temp - 18.6).abs() < 1e-9);
        assert_eq!(json["summary"]["date_min"], json!("2023-01-05"));
        assert_eq!(json["summary"]["date_max"], json!("2023-01-06"));
        assert_eq!(json["sample"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn fisheries_summary_computes_scalars() {
        let csv = "Species,Fish Count,Avg Length,Stage\n\
                   Sardina pilchardus,100,120.5,adult\n\
                   Engraulis encrasicolus,40,80.0,juvenile\n";
        let app = api_router(bare_state());
        let response = app
            .oneshot(multipart_request("/api/fisheries/summary", "catch.csv", csv))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["summary"]["unique_species"], json!(2));
        assert_eq!(json["summary"]["total_fish"], json!(140));
        assert_eq!(json["summary"]["avg_length"], json!(100.25));
    }

    #[tokio::test]
    async fn unsupported_extension_is_rejected() {
        let app = api_router(bare_state());
        let response = app
            .oneshot(multipart_request("/api/ocean/summary", "survey.pdf", "x"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        let msg = json["error"].as_str().unwrap();
        assert!(msg.contains("Unsupported file type"), "got: {msg}");
    }

    // ── Prediction endpoints ────────────────────────────────

    #[tokio::test]
    async fn predict_with_empty_slot_returns_service_unavailable() {
        let app = api_router(bare_state());
        let response = app
            .oneshot(json_request(
                "/api/predict/ocean",
                json!({"features": [18.2, 33.1, 7.4, 8.1, 12.0]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let json = body_json(response).await;
        let msg = json["error"].as_str().unwrap();
        assert!(msg.contains("ocean model not available"), "got: {msg}");
        // Never leak internals beyond the recorded reason.
        assert!(!msg.contains("panic"));
        assert!(!msg.contains("backtrace"));
    }

    #[tokio::test]
    async fn predict_ocean_single_vector() {
        let app = api_router(fitted_state());
        let response = app
            .oneshot(json_request(
                "/api/predict/ocean",
                json!({"features": [1.0, 2.0, 3.0, 4.0, 5.0]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        // 1.0 + 0.1·1 + 0.2·2 + 0.3·3 + 0.4·4 + 0.5·5 = 6.5
        assert!((json["prediction"].as_f64().unwrap() - 6.5).abs() < 1e-9);
        assert_eq!(
            json["features_order"],
            json!(["temperature_C", "salinity_PSU", "oxygen_mgL", "pH", "depth_m"])
        );
    }

    #[tokio::test]
    async fn predict_wrong_feature_count_names_both() {
        let app = api_router(fitted_state());
        let response = app
            .oneshot(json_request(
                "/api/predict/ocean",
                json!({"features": [1.0, 2.0, 3.0]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        let msg = json["error"].as_str().unwrap();
        assert!(msg.contains("expected 5"), "got: {msg}");
        assert!(msg.contains("received 3"), "got: {msg}");
    }

    #[tokio::test]
    async fn predict_without_features_or_file_is_rejected() {
        let app = api_router(fitted_state());
        let response = app
            .oneshot(json_request("/api/predict/fish", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("features"));
    }

    #[tokio::test]
    async fn predict_fish_batch_from_csv() {
        let app = api_router(fitted_state());
        let response = app
            .oneshot(multipart_request("/api/predict/fish", "survey.csv", OCEAN_CSV))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["count"], json!(2));
        let predictions = json["predictions"].as_array().unwrap();
        assert_eq!(predictions.len(), 2);
        // Sum of the first row's features under the all-ones model.
        let expected = 18.2 + 33.1 + 7.4 + 8.1 + 12.0;
        assert!((predictions[0].as_f64().unwrap() - expected).abs() < 1e-9);
    }

    #[tokio::test]
    async fn predict_csv_missing_required_column() {
        let csv = "Temp,DO mg/L,pH,Depth (m)\n18.2,7.4,8.1,12\n";
        let app = api_router(fitted_state());
        let response = app
            .oneshot(multipart_request("/api/predict/ocean", "survey.csv", csv))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        let msg = json["error"].as_str().unwrap();
        assert!(msg.contains("Missing required columns"), "got: {msg}");
        assert!(msg.contains("salinity_PSU"), "got: {msg}");
    }

    #[tokio::test]
    async fn predict_species_returns_label_and_confidence() {
        let app = api_router(fitted_state());
        // Second feature dominates → second class.
        let response = app
            .oneshot(json_request(
                "/api/predict/species",
                json!({"features": [0.0, 9.0, 0.0, 0.0, 0.0]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["predicted_species"], json!("Engraulis encrasicolus"));
        let confidence = json["confidence"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&confidence));
        assert!(confidence > 0.9);
    }

    #[tokio::test]
    async fn malformed_json_body_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/predict/ocean")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let app = api_router(fitted_state());
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
