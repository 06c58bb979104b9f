//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the classifier input schema.**
//!
//! ## Rules:
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! The classifier artifact was trained on exactly this order; a different
//! order silently produces garbage predictions rather than an error.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::constants;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// READING FIELDS
// ============================================================================

/// The nine reading fields, in classifier order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingField {
    Temperature,
    Humidity,
    StorageDays,
    Airflow,
    DewPoint,
    AmbientLight,
    PestPresence,
    GrainMoisture,
    Rainfall,
}

impl ReadingField {
    /// All fields in classifier order
    pub const ALL: [ReadingField; FEATURE_COUNT] = [
        ReadingField::Temperature,
        ReadingField::Humidity,
        ReadingField::StorageDays,
        ReadingField::Airflow,
        ReadingField::DewPoint,
        ReadingField::AmbientLight,
        ReadingField::PestPresence,
        ReadingField::GrainMoisture,
        ReadingField::Rainfall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingField::Temperature => "temperature",
            ReadingField::Humidity => "humidity",
            ReadingField::StorageDays => "storage_days",
            ReadingField::Airflow => "airflow",
            ReadingField::DewPoint => "dew_point",
            ReadingField::AmbientLight => "ambient_light",
            ReadingField::PestPresence => "pest_presence",
            ReadingField::GrainMoisture => "grain_moisture",
            ReadingField::Rainfall => "rainfall",
        }
    }

    /// Position in the feature vector
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Value substituted when the field is absent
    pub fn default_value(&self) -> f64 {
        match self {
            ReadingField::Temperature => constants::DEFAULT_TEMPERATURE,
            ReadingField::Humidity => constants::DEFAULT_HUMIDITY,
            ReadingField::StorageDays => constants::DEFAULT_STORAGE_DAYS,
            ReadingField::Airflow => constants::DEFAULT_AIRFLOW,
            ReadingField::DewPoint => constants::DEFAULT_DEW_POINT,
            ReadingField::AmbientLight => constants::DEFAULT_AMBIENT_LIGHT,
            ReadingField::PestPresence => constants::DEFAULT_PEST_PRESENCE,
            ReadingField::GrainMoisture => constants::DEFAULT_GRAIN_MOISTURE,
            ReadingField::Rainfall => constants::DEFAULT_RAINFALL,
        }
    }

    /// Clamp range applied when building the feature vector.
    /// Fields without a range pass through unchanged.
    pub fn clamp_range(&self) -> Option<(f64, f64)> {
        match self {
            ReadingField::Temperature => Some(constants::TEMPERATURE_RANGE),
            ReadingField::Humidity => Some(constants::HUMIDITY_RANGE),
            ReadingField::GrainMoisture => Some(constants::GRAIN_MOISTURE_RANGE),
            ReadingField::Rainfall => Some(constants::RAINFALL_RANGE),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReadingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// FEATURE LAYOUT
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    "temperature",    // 0: °C, clamped [0, 60]
    "humidity",       // 1: %RH, clamped [0, 100]
    "storage_days",   // 2: days in storage
    "airflow",        // 3: m/s
    "dew_point",      // 4: °C
    "ambient_light",  // 5: lux
    "pest_presence",  // 6: 0 = none
    "grain_moisture", // 7: %, clamped [5, 30]
    "rainfall",       // 8: mm, clamped [0, 300]
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 9;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over version + ordered feature names
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }

    hasher.finalize()
}

/// Layout information for logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Get feature index by name
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
        assert_eq!(ReadingField::ALL.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_fields_match_layout_order() {
        for (i, field) in ReadingField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
            assert_eq!(FEATURE_LAYOUT[i], field.as_str());
            assert_eq!(feature_index(field.as_str()), Some(i));
        }
        assert_eq!(feature_index("co2"), None);
    }

    #[test]
    fn test_layout_hash_stable() {
        assert_eq!(layout_hash(), layout_hash());
        assert_ne!(layout_hash(), 0);
        assert_eq!(LayoutInfo::current().hash, layout_hash());
    }

    #[test]
    fn test_defaults() {
        let defaults: Vec<f64> = ReadingField::ALL.iter().map(|f| f.default_value()).collect();
        assert_eq!(defaults, vec![25.0, 60.0, 1.0, 1.0, 20.0, 100.0, 0.0, 15.0, 0.0]);
    }

    #[test]
    fn test_clamped_fields() {
        let clamped: Vec<ReadingField> = ReadingField::ALL
            .iter()
            .copied()
            .filter(|f| f.clamp_range().is_some())
            .collect();
        assert_eq!(
            clamped,
            vec![
                ReadingField::Temperature,
                ReadingField::Humidity,
                ReadingField::GrainMoisture,
                ReadingField::Rainfall,
            ]
        );
    }
}
