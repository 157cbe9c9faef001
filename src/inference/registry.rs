//! Model registry — load once at startup, read-only afterward.
//!
//! Every slot is attempted exactly once while the process is still
//! single-threaded; a missing or corrupt artifact is logged and recorded
//! as unavailable, never a startup failure. Handlers receive the
//! registry inside `Arc<CoreState>` and read it without locking — after
//! load nothing is ever mutated.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use super::predictor::{load_artifact, Predictor};

/// Identifiers for the configured model slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelId {
    Ocean,
    Fish,
    Species,
}

impl ModelId {
    pub const ALL: [ModelId; 3] = [ModelId::Ocean, ModelId::Fish, ModelId::Species];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::Ocean => "ocean",
            ModelId::Fish => "fish",
            ModelId::Species => "species",
        }
    }
}

/// Why a slot holds no model. Absence is a normal state, not an error —
/// the reason is kept so consumers can report it.
#[derive(Debug, Clone, Error)]
pub enum UnavailableReason {
    #[error("artifact not found at {0}")]
    ArtifactMissing(String),
    #[error("artifact failed to load: {0}")]
    LoadFailed(String),
    #[error("built without the '{0}' feature")]
    FeatureDisabled(&'static str),
}

pub enum ModelSlot {
    Ready(Arc<dyn Predictor>),
    Unavailable(UnavailableReason),
}

/// Per-slot availability for the service banner.
#[derive(Debug, Serialize)]
pub struct ModelStatus {
    pub name: &'static str,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

pub struct ModelRegistry {
    ocean: ModelSlot,
    fish: ModelSlot,
    species: ModelSlot,
}

impl ModelRegistry {
    /// Attempt every configured slot under `model_dir`.
    pub fn load(model_dir: &Path) -> Self {
        let registry = Self {
            ocean: load_json_slot(model_dir.join("model-ocean.json")),
            fish: load_json_slot(model_dir.join("model-fish.json")),
            species: load_species_slot(&model_dir.join("species")),
        };
        for id in ModelId::ALL {
            match registry.slot(id) {
                ModelSlot::Ready(model) => tracing::info!(
                    model = id.as_str(),
                    features = model.feature_count(),
                    probability = model.supports_probability(),
                    "model loaded"
                ),
                ModelSlot::Unavailable(reason) => tracing::warn!(
                    model = id.as_str(),
                    %reason,
                    "model unavailable, endpoint will return 503"
                ),
            }
        }
        registry
    }

    /// Build a registry from explicit slots. Used by tests and by
    /// embedders that load models through other means.
    pub fn with_slots(ocean: ModelSlot, fish: ModelSlot, species: ModelSlot) -> Self {
        Self {
            ocean,
            fish,
            species,
        }
    }

    pub fn slot(&self, id: ModelId) -> &ModelSlot {
        match id {
            ModelId::Ocean => &self.ocean,
            ModelId::Fish => &self.fish,
            ModelId::Species => &self.species,
        }
    }

    /// The handle for `id`, or the recorded reason it is unavailable.
    pub fn require(&self, id: ModelId) -> Result<Arc<dyn Predictor>, UnavailableReason> {
        match self.slot(id) {
            ModelSlot::Ready(model) => Ok(Arc::clone(model)),
            ModelSlot::Unavailable(reason) => Err(reason.clone()),
        }
    }

    pub fn statuses(&self) -> Vec<ModelStatus> {
        ModelId::ALL
            .iter()
            .map(|id| match self.slot(*id) {
                ModelSlot::Ready(_) => ModelStatus {
                    name: id.as_str(),
                    available: true,
                    reason: None,
                },
                ModelSlot::Unavailable(reason) => ModelStatus {
                    name: id.as_str(),
                    available: false,
                    reason: Some(reason.to_string()),
                },
            })
            .collect()
    }
}

fn load_json_slot(path: std::path::PathBuf) -> ModelSlot {
    if !path.exists() {
        return ModelSlot::Unavailable(UnavailableReason::ArtifactMissing(
            path.display().to_string(),
        ));
    }
    match load_artifact(&path) {
        Ok(model) => ModelSlot::Ready(model),
        Err(e) => ModelSlot::Unavailable(UnavailableReason::LoadFailed(e.to_string())),
    }
}

#[cfg(feature = "onnx-species")]
fn load_species_slot(model_dir: &Path) -> ModelSlot {
    use super::onnx::OnnxClassifier;

    if !model_dir.join("model.onnx").exists() {
        return ModelSlot::Unavailable(UnavailableReason::ArtifactMissing(
            model_dir.join("model.onnx").display().to_string(),
        ));
    }
    match OnnxClassifier::load(model_dir, super::OCEAN_FEATURES.len()) {
        Ok(model) => ModelSlot::Ready(Arc::new(model)),
        Err(e) => ModelSlot::Unavailable(UnavailableReason::LoadFailed(e.to_string())),
    }
}

#[cfg(not(feature = "onnx-species"))]
fn load_species_slot(_model_dir: &Path) -> ModelSlot {
    ModelSlot::Unavailable(UnavailableReason::FeatureDisabled("onnx-species"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dir_leaves_all_slots_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let registry = ModelRegistry::load(dir.path());

        for id in [ModelId::Ocean, ModelId::Fish] {
            match registry.slot(id) {
                ModelSlot::Unavailable(UnavailableReason::ArtifactMissing(_)) => {}
                _ => panic!("{} should be missing", id.as_str()),
            }
        }
        assert!(registry.require(ModelId::Ocean).is_err());
    }

    #[test]
    fn valid_artifact_loads() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("model-ocean.json"),
            r#"{"kind":"linear","intercept":1.0,"coefficients":[0.1,0.2,0.3,0.4,0.5]}"#,
        )
        .unwrap();

        let registry = ModelRegistry::load(dir.path());
        let model = registry.require(ModelId::Ocean).unwrap();
        assert_eq!(model.feature_count(), 5);
    }

    #[test]
    fn corrupt_artifact_records_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("model-fish.json"), b"not json").unwrap();

        let registry = ModelRegistry::load(dir.path());
        match registry.slot(ModelId::Fish) {
            ModelSlot::Unavailable(UnavailableReason::LoadFailed(_)) => {}
            _ => panic!("corrupt artifact should record a load failure"),
        }
    }

    #[cfg(not(feature = "onnx-species"))]
    #[test]
    fn species_slot_reports_disabled_feature() {
        let dir = tempfile::tempdir().unwrap();
        let registry = ModelRegistry::load(dir.path());
        match registry.slot(ModelId::Species) {
            ModelSlot::Unavailable(UnavailableReason::FeatureDisabled(f)) => {
                assert_eq!(*f, "onnx-species");
            }
            _ => panic!("species slot should be feature-gated"),
        }
    }

    #[test]
    fn statuses_cover_every_slot() {
        let dir = tempfile::tempdir().unwrap();
        let statuses = ModelRegistry::load(dir.path()).statuses();
        assert_eq!(statuses.len(), 3);
        assert!(statuses.iter().all(|s| !s.available));
        assert!(statuses.iter().all(|s| s.reason.is_some()));
    }
}
