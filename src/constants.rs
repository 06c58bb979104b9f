//! Central Configuration Constants
//!
//! Single source of truth for reading defaults, clamp ranges and
//! artifact/identity defaults. Tier tables live in `logic::spoilage::rules`.

// ============================================
// Reading defaults (applied when a field is missing)
// ============================================

pub const DEFAULT_TEMPERATURE: f64 = 25.0;
pub const DEFAULT_HUMIDITY: f64 = 60.0;
pub const DEFAULT_STORAGE_DAYS: f64 = 1.0;
pub const DEFAULT_AIRFLOW: f64 = 1.0;
pub const DEFAULT_DEW_POINT: f64 = 20.0;
pub const DEFAULT_AMBIENT_LIGHT: f64 = 100.0;
pub const DEFAULT_PEST_PRESENCE: f64 = 0.0;
pub const DEFAULT_GRAIN_MOISTURE: f64 = 15.0;
pub const DEFAULT_RAINFALL: f64 = 0.0;

// ============================================
// Clamp ranges (feature vector only, never the raw signals)
// ============================================

/// Temperature range in °C
pub const TEMPERATURE_RANGE: (f64, f64) = (0.0, 60.0);

/// Relative humidity range in %
pub const HUMIDITY_RANGE: (f64, f64) = (0.0, 100.0);

/// Grain moisture range in %
pub const GRAIN_MOISTURE_RANGE: (f64, f64) = (5.0, 30.0);

/// Rainfall range in mm
pub const RAINFALL_RANGE: (f64, f64) = (0.0, 300.0);

// ============================================
// Classifier artifact & identity
// ============================================

/// Default classifier artifact path
pub const DEFAULT_MODEL_PATH: &str = "models/smartbin_model.onnx";

/// Model identity reported on the success path
pub const DEFAULT_MODEL_NAME: &str = "SmartBin-RiceSpoilage";

/// Model identity reported on the fallback path
pub const FALLBACK_MODEL_NAME: &str = "SmartBin-Fallback";

/// Default ONNX Runtime intra-op thread count
pub const DEFAULT_INTRA_THREADS: usize = 1;

/// Maximum tolerated drift of a probability distribution from 1.0
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-3;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "grain-spoilage";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get classifier artifact path from environment or use default
pub fn get_model_path() -> String {
    std::env::var("SPOILAGE_MODEL_PATH")
        .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}

/// Get model identity from environment or use default
pub fn get_model_name() -> String {
    std::env::var("SPOILAGE_MODEL_NAME")
        .unwrap_or_else(|_| DEFAULT_MODEL_NAME.to_string())
}

/// Get expected artifact SHA-256 (hex) from environment, if configured
pub fn get_model_sha256() -> Option<String> {
    std::env::var("SPOILAGE_MODEL_SHA256")
        .ok()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}

/// Get ONNX Runtime intra-op thread count from environment or use default
pub fn get_intra_threads() -> usize {
    std::env::var("SPOILAGE_INTRA_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|n: &usize| *n > 0)
        .unwrap_or(DEFAULT_INTRA_THREADS)
}
