//! Model loading, registry, and prediction dispatch.

pub mod dispatch;
#[cfg(feature = "onnx-species")]
pub mod onnx;
pub mod predictor;
pub mod registry;

pub use dispatch::{dispatch, Prediction};
pub use predictor::{InferenceError, Predictor};
pub use registry::{ModelId, ModelRegistry, ModelSlot, UnavailableReason};

/// Feature order the numeric models were fit with. Callers must supply
/// features in exactly this order and length; it is never inferred from
/// an input file.
pub const OCEAN_FEATURES: [&str; 5] = [
    "temperature_C",
    "salinity_PSU",
    "oxygen_mgL",
    "pH",
    "depth_m",
];
