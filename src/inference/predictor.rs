//! The `Predictor` trait and the JSON-artifact model backends.
//!
//! A model is an opaque handle behind `Arc<dyn Predictor>`: a fixed
//! feature count, a capability flag for probability-style output, and
//! the two invocation paths. Fitted coefficients arrive as JSON
//! artifacts exported by the offline training jobs — training itself is
//! out of scope here.

use std::path::Path;
use std::sync::Arc;

use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("expected {expected} features, received {received}")]
    FeatureMismatch { expected: usize, received: usize },
    #[error("model backend failure: {0}")]
    Backend(String),
}

/// A loaded predictive model.
///
/// `predict` is always available; `predict_proba` only when
/// `supports_probability` says so — callers must check the capability
/// rather than probing for errors.
pub trait Predictor: Send + Sync {
    /// Number of input features the model was fit with. Feature order is
    /// a fixed constant of the calling endpoint, never inferred.
    fn feature_count(&self) -> usize;

    fn supports_probability(&self) -> bool {
        false
    }

    /// Class labels, for classifiers.
    fn classes(&self) -> Option<&[String]> {
        None
    }

    /// Point-estimate output, shape (n,).
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, InferenceError>;

    /// Probability-style output, shape (n, c). Only meaningful when
    /// `supports_probability` is true.
    fn predict_proba(&self, _x: ArrayView2<'_, f64>) -> Result<Array2<f64>, InferenceError> {
        Err(InferenceError::Backend(
            "model does not expose probability output".into(),
        ))
    }
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("could not read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid model artifact: {0}")]
    Invalid(String),
}

/// On-disk model description. The tag picks the backend; shapes are
/// validated on load so inference can trust them.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
    Softmax {
        classes: Vec<String>,
        intercepts: Vec<f64>,
        /// One coefficient row per class.
        coefficients: Vec<Vec<f64>>,
    },
}

/// Load a JSON model artifact into a predictor handle.
pub fn load_artifact(path: &Path) -> Result<Arc<dyn Predictor>, ArtifactError> {
    let bytes = std::fs::read(path)?;
    let artifact: ModelArtifact = serde_json::from_slice(&bytes)?;
    build(artifact)
}

fn build(artifact: ModelArtifact) -> Result<Arc<dyn Predictor>, ArtifactError> {
    match artifact {
        ModelArtifact::Linear {
            intercept,
            coefficients,
        } => {
            if coefficients.is_empty() {
                return Err(ArtifactError::Invalid("linear model has no coefficients".into()));
            }
            Ok(Arc::new(LinearModel {
                intercept,
                coefficients: Array1::from(coefficients),
            }))
        }
        ModelArtifact::Softmax {
            classes,
            intercepts,
            coefficients,
        } => {
            if classes.is_empty() {
                return Err(ArtifactError::Invalid("softmax model has no classes".into()));
            }
            if classes.len() != intercepts.len() || classes.len() != coefficients.len() {
                return Err(ArtifactError::Invalid(format!(
                    "softmax model shape mismatch: {} classes, {} intercepts, {} coefficient rows",
                    classes.len(),
                    intercepts.len(),
                    coefficients.len()
                )));
            }
            let k = coefficients[0].len();
            if k == 0 || coefficients.iter().any(|row| row.len() != k) {
                return Err(ArtifactError::Invalid(
                    "softmax coefficient rows must be non-empty and uniform".into(),
                ));
            }
            let flat: Vec<f64> = coefficients.into_iter().flatten().collect();
            let weights = Array2::from_shape_vec((classes.len(), k), flat)
                .expect("row lengths validated above");
            Ok(Arc::new(SoftmaxClassifier {
                classes,
                intercepts: Array1::from(intercepts),
                weights,
            }))
        }
    }
}

// ──────────────────────────────────────────────
// Linear regression — point estimates only
// ──────────────────────────────────────────────

pub struct LinearModel {
    intercept: f64,
    coefficients: Array1<f64>,
}

impl LinearModel {
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Self {
        Self {
            intercept,
            coefficients: Array1::from(coefficients),
        }
    }
}

impl Predictor for LinearModel {
    fn feature_count(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, InferenceError> {
        Ok(x.dot(&self.coefficients) + self.intercept)
    }
}

// ──────────────────────────────────────────────
// Softmax classifier — probabilities, point estimate falls back to the
// winning class index
// ──────────────────────────────────────────────

pub struct SoftmaxClassifier {
    classes: Vec<String>,
    intercepts: Array1<f64>,
    /// Shape (c, k).
    weights: Array2<f64>,
}

impl SoftmaxClassifier {
    pub fn new(classes: Vec<String>, intercepts: Vec<f64>, weights: Array2<f64>) -> Self {
        assert_eq!(classes.len(), weights.nrows());
        assert_eq!(classes.len(), intercepts.len());
        Self {
            classes,
            intercepts: Array1::from(intercepts),
            weights,
        }
    }
}

impl Predictor for SoftmaxClassifier {
    fn feature_count(&self) -> usize {
        self.weights.ncols()
    }

    fn supports_probability(&self) -> bool {
        true
    }

    fn classes(&self) -> Option<&[String]> {
        Some(&self.classes)
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, InferenceError> {
        let proba = self.predict_proba(x)?;
        Ok(proba.map_axis(Axis(1), |row| argmax(row.iter().copied()) as f64))
    }

    fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, InferenceError> {
        let mut logits = x.dot(&self.weights.t()) + &self.intercepts;
        for mut row in logits.rows_mut() {
            // Max-shift before exponentiating keeps large logits finite.
            let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            row.mapv_inplace(|v| (v - max).exp());
            let total = row.sum();
            if total > 0.0 {
                row.mapv_inplace(|v| v / total);
            }
        }
        Ok(logits)
    }
}

pub(crate) fn argmax(values: impl Iterator<Item = f64>) -> usize {
    values
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
