//! Prediction dispatch — pick the richest output mode a model supports.
//!
//! Probability-style output carries more information than a point
//! estimate, so it wins when available; a model without it falls back
//! silently. The only hard failure at this layer is a feature-count
//! mismatch, which is the caller's malformed input.

use ndarray::{Array1, Array2, ArrayView2};

use super::predictor::{InferenceError, Predictor};

/// Uniform dispatch result.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// Shape (n,).
    Points(Array1<f64>),
    /// Shape (n, c).
    Probabilities(Array2<f64>),
}

impl Prediction {
    /// Number of input rows this prediction covers.
    pub fn len(&self) -> usize {
        match self {
            Prediction::Points(v) => v.len(),
            Prediction::Probabilities(m) => m.nrows(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Invoke `model` over `features`, preferring probability output.
pub fn dispatch(
    model: &dyn Predictor,
    features: ArrayView2<'_, f64>,
) -> Result<Prediction, InferenceError> {
    let expected = model.feature_count();
    let received = features.ncols();
    if received != expected {
        return Err(InferenceError::FeatureMismatch { expected, received });
    }

    if model.supports_probability() {
        model.predict_proba(features).map(Prediction::Probabilities)
    } else {
        model.predict(features).map(Prediction::Points)
    }
}
