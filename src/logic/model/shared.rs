//! Load-once, serve-many classifier handle
//!
//! Constructed once at process start and passed by reference. Only a
//! successful load is cached; a failed load is reported to the caller and
//! attempted again on the next call.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::classifier::SpoilageClassifier;
use crate::config::EngineConfig;
use crate::error::SpoilageResult;

pub struct SharedClassifier {
    config: EngineConfig,
    cell: OnceCell<Arc<dyn SpoilageClassifier>>,
}

impl SharedClassifier {
    /// Lazily load from the configured artifact
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            cell: OnceCell::new(),
        }
    }

    /// Wrap an already constructed classifier
    pub fn preloaded(config: EngineConfig, classifier: Arc<dyn SpoilageClassifier>) -> Self {
        Self {
            config,
            cell: OnceCell::with_value(classifier),
        }
    }

    pub fn get(&self) -> SpoilageResult<Arc<dyn SpoilageClassifier>> {
        self.cell
            .get_or_try_init(|| load(&self.config))
            .map(Arc::clone)
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[cfg(feature = "onnx")]
fn load(config: &EngineConfig) -> SpoilageResult<Arc<dyn SpoilageClassifier>> {
    let classifier = super::onnx::OnnxClassifier::load(config).map_err(|e| {
        log::warn!("Classifier load failed: {}", e);
        e
    })?;
    Ok(Arc::new(classifier))
}

#[cfg(not(feature = "onnx"))]
fn load(config: &EngineConfig) -> SpoilageResult<Arc<dyn SpoilageClassifier>> {
    super::artifact::verify_artifact(&config.model_path, config.model_sha256.as_deref())?;
    Err(crate::error::SpoilageError::ClassifierLoad(
        "built without the `onnx` feature; no classifier backend available".to_string(),
    ))
}
