//! Configuration module

use std::path::PathBuf;

use crate::constants;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Classifier artifact path
    pub model_path: PathBuf,

    /// Model identity reported on successful assessments
    pub model_name: String,

    /// Expected SHA-256 of the artifact (lowercase hex), if pinned
    pub model_sha256: Option<String>,

    /// ONNX Runtime intra-op threads
    pub intra_threads: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(constants::DEFAULT_MODEL_PATH),
            model_name: constants::DEFAULT_MODEL_NAME.to_string(),
            model_sha256: None,
            intra_threads: constants::DEFAULT_INTRA_THREADS,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// `.env` is loaded once by the binary before this runs.
    pub fn from_env() -> Self {
        Self {
            model_path: PathBuf::from(constants::get_model_path()),
            model_name: constants::get_model_name(),
            model_sha256: constants::get_model_sha256(),
            intra_threads: constants::get_intra_threads(),
        }
    }

    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = name.into();
        self
    }

    pub fn with_model_sha256(mut self, digest: impl Into<String>) -> Self {
        self.model_sha256 = Some(digest.into().trim().to_lowercase());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.model_path, PathBuf::from("models/smartbin_model.onnx"));
        assert_eq!(config.model_name, "SmartBin-RiceSpoilage");
        assert!(config.model_sha256.is_none());
        assert_eq!(config.intra_threads, 1);
    }

    #[test]
    fn test_builder_overrides() {
        let config = EngineConfig::default()
            .with_model_path("/tmp/other.onnx")
            .with_model_name("Custom")
            .with_model_sha256("  ABCDEF ");

        assert_eq!(config.model_path, PathBuf::from("/tmp/other.onnx"));
        assert_eq!(config.model_name, "Custom");
        assert_eq!(config.model_sha256.as_deref(), Some("abcdef"));
    }

    #[test]
    fn test_from_env_reads_process_environment() {
        std::env::set_var("SPOILAGE_MODEL_NAME", "Env-Model");
        std::env::set_var("SPOILAGE_MODEL_SHA256", " ABC123 ");
        let config = EngineConfig::from_env();
        std::env::remove_var("SPOILAGE_MODEL_NAME");
        std::env::remove_var("SPOILAGE_MODEL_SHA256");

        assert_eq!(config.model_name, "Env-Model");
        assert_eq!(config.model_sha256.as_deref(), Some("abc123"));
    }
}
