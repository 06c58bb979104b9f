//! Feature Vector - classifier input
//!
//! **Versioned feature vector with layout metadata**
//!
//! Uses the centralized layout from `layout.rs` for ordering, version
//! tracking and the layout hash.

use serde::{Deserialize, Serialize};

use super::layout::{
    feature_index, layout_hash, ReadingField, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION,
};
use super::reading::ResolvedReading;

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Ordered, clamped classifier input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f32; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create from raw values with current version (no clamping)
    pub fn from_values(values: [f32; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Assemble from a resolved reading, clamping the bounded fields
    pub fn from_reading(reading: &ResolvedReading) -> Self {
        reading
            .iter()
            .fold(FeatureVectorBuilder::new(), |builder, (field, value)| builder.set(field, value))
            .build()
    }

    pub fn as_array(&self) -> &[f32; FEATURE_COUNT] {
        &self.values
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn get(&self, field: ReadingField) -> f32 {
        self.values[field.index()]
    }

    pub fn get_by_name(&self, name: &str) -> Option<f32> {
        feature_index(name).and_then(|i| self.values.get(i).copied())
    }

    /// JSON form for debug logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<std::collections::BTreeMap<_, _>>(),
        })
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for FeatureVector. Unset fields take their reading defaults;
/// clamping is applied once, at `build`.
pub struct FeatureVectorBuilder {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        for field in ReadingField::ALL {
            values[field.index()] = field.default_value();
        }
        Self { values }
    }

    pub fn set(mut self, field: ReadingField, value: f64) -> Self {
        self.values[field.index()] = value;
        self
    }

    pub fn build(self) -> FeatureVector {
        let mut values = [0.0f32; FEATURE_COUNT];
        for field in ReadingField::ALL {
            let raw = self.values[field.index()];
            let clamped = match field.clamp_range() {
                Some((min, max)) => raw.clamp(min, max),
                None => raw,
            };
            values[field.index()] = clamped as f32;
        }
        FeatureVector::from_values(values)
    }
}

impl Default for FeatureVectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let vector = FeatureVectorBuilder::new().build();
        assert_eq!(vector.version, FEATURE_VERSION);
        assert_eq!(vector.layout_hash, layout_hash());
        assert_eq!(
            vector.values,
            [25.0, 60.0, 1.0, 1.0, 20.0, 100.0, 0.0, 15.0, 0.0]
        );
    }

    #[test]
    fn test_clamping() {
        let vector = FeatureVectorBuilder::new()
            .set(ReadingField::Temperature, 200.0)
            .set(ReadingField::Humidity, -3.0)
            .set(ReadingField::GrainMoisture, 2.0)
            .set(ReadingField::Rainfall, 1000.0)
            .build();

        assert_eq!(vector.get(ReadingField::Temperature), 60.0);
        assert_eq!(vector.get(ReadingField::Humidity), 0.0);
        assert_eq!(vector.get(ReadingField::GrainMoisture), 5.0);
        assert_eq!(vector.get(ReadingField::Rainfall), 300.0);
    }

    #[test]
    fn test_unbounded_fields_pass_through() {
        let vector = FeatureVectorBuilder::new()
            .set(ReadingField::StorageDays, -10.0)
            .set(ReadingField::AmbientLight, 90_000.0)
            .set(ReadingField::Airflow, -1.0)
            .build();

        assert_eq!(vector.get(ReadingField::StorageDays), -10.0);
        assert_eq!(vector.get(ReadingField::AmbientLight), 90_000.0);
        assert_eq!(vector.get(ReadingField::Airflow), -1.0);
    }

    #[test]
    fn test_get_by_name() {
        let vector = FeatureVectorBuilder::new()
            .set(ReadingField::DewPoint, 18.5)
            .build();
        assert_eq!(vector.get_by_name("dew_point"), Some(18.5));
        assert_eq!(vector.get_by_name("co2"), None);
    }

    #[test]
    fn test_to_log_entry() {
        let vector = FeatureVectorBuilder::new().build();
        let log = vector.to_log_entry();
        assert_eq!(log["feature_version"], FEATURE_VERSION);
        assert_eq!(log["named_values"]["humidity"], 60.0);
    }
}
