//! ONNX-backed species classifier — behind the `onnx-species` feature.
//!
//! The classifier artifact is a `model.onnx` exported from the offline
//! training pipeline, taking an n×k float feature matrix and returning
//! n×c class probabilities for the fixed species label set. Builds
//! without the feature record the registry slot as unavailable instead.

use std::path::Path;
use std::sync::Mutex;

use ndarray::{Array1, Array2, ArrayView2, Axis};
use ort::session::Session;
use ort::value::TensorRef;

use crate::config::SPECIES_LABELS;

use super::predictor::{argmax, ArtifactError, InferenceError, Predictor};

/// Species classifier backed by an ONNX Runtime session.
///
/// Uses interior mutability (Mutex) because `Session::run` requires
/// `&mut self` while `Predictor` exposes `&self` for shared registry
/// handles.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    classes: Vec<String>,
    feature_count: usize,
}

impl OnnxClassifier {
    /// Load `model.onnx` from `model_dir`.
    pub fn load(model_dir: &Path, feature_count: usize) -> Result<Self, ArtifactError> {
        let model_path = model_dir.join("model.onnx");
        if !model_path.exists() {
            return Err(ArtifactError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", model_path.display()),
            )));
        }

        let session = Session::builder()
            .map_err(|e: ort::Error| ArtifactError::Invalid(e.to_string()))?
            .with_intra_threads(2)
            .map_err(|e: ort::Error| ArtifactError::Invalid(e.to_string()))?
            .commit_from_file(&model_path)
            .map_err(|e: ort::Error| ArtifactError::Invalid(format!("ONNX load failed: {e}")))?;

        tracing::info!("ONNX species classifier loaded from {}", model_dir.display());

        Ok(Self {
            session: Mutex::new(session),
            classes: SPECIES_LABELS.iter().map(|s| s.to_string()).collect(),
            feature_count,
        })
    }

    fn infer(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, InferenceError> {
        let input: Array2<f32> = x.mapv(|v| v as f32);
        let tensor = TensorRef::from_array_view(&input)
            .map_err(|e| InferenceError::Backend(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| InferenceError::Backend("session lock poisoned".into()))?;

        let outputs = session
            .run(ort::inputs![tensor])
            .map_err(|e| InferenceError::Backend(format!("ONNX inference failed: {e}")))?;

        let (shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::Backend(format!("output extraction: {e}")))?;

        let (rows, classes) = (x.nrows(), self.classes.len());
        if shape.len() != 2 || shape[0] as usize != rows || shape[1] as usize != classes {
            return Err(InferenceError::Backend(format!(
                "unexpected output shape {shape:?}, expected [{rows}, {classes}]"
            )));
        }

        let values: Vec<f64> = data.iter().map(|&v| v as f64).collect();
        Array2::from_shape_vec((rows, classes), values)
            .map_err(|e| InferenceError::Backend(e.to_string()))
    }
}

impl Predictor for OnnxClassifier {
    fn feature_count(&self) -> usize {
        self.feature_count
    }

    fn supports_probability(&self) -> bool {
        true
    }

    fn classes(&self) -> Option<&[String]> {
        Some(&self.classes)
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, InferenceError> {
        let proba = self.infer(x)?;
        Ok(proba.map_axis(Axis(1), |row| argmax(row.iter().copied()) as f64))
    }

    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, InferenceError> {
        self.infer(x)
    }
}
