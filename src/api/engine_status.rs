use serde::{Deserialize, Serialize};

use crate::constants::APP_VERSION;
use crate::logic::features::LayoutInfo;
use crate::logic::spoilage::{EngineStatus, SpoilageEngine};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatusReport {
    pub version: String,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub feature_count: usize,

    pub model_path: String,
    pub backend: String, // "onnx" | "none"
    pub engine: EngineStatus,
}

impl EngineStatusReport {
    pub fn collect(engine: &SpoilageEngine) -> Self {
        let layout = LayoutInfo::current();
        let backend = if cfg!(feature = "onnx") { "onnx" } else { "none" };

        Self {
            version: APP_VERSION.to_string(),
            feature_version: layout.version,
            layout_hash: layout.hash,
            feature_count: layout.feature_count,
            model_path: engine.config().model_path.display().to_string(),
            backend: backend.to_string(),
            engine: engine.stats(),
        }
    }
}
