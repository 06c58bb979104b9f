//! Raw Reading - loosely-typed telemetry as received
//!
//! Every field is optional. `null` counts as missing. Booleans are read
//! as 0/1. Anything else non-numeric is kept as-is and only rejected when
//! the reading is resolved for arithmetic.

use serde::{Deserialize, Serialize};

use super::layout::{ReadingField, FEATURE_COUNT};
use crate::error::{SpoilageError, SpoilageResult};

// ============================================================================
// READING VALUE
// ============================================================================

/// A single field value, as loosely typed as the wire allows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReadingValue {
    Number(f64),
    Flag(bool),
    Malformed(serde_json::Value),
}

impl ReadingValue {
    /// Numeric view, or a description of why there is none
    pub fn to_number(&self) -> Result<f64, String> {
        match self {
            ReadingValue::Number(v) if v.is_finite() => Ok(*v),
            ReadingValue::Number(v) => Err(format!("expected a finite number, got {}", v)),
            ReadingValue::Flag(b) => Ok(if *b { 1.0 } else { 0.0 }),
            ReadingValue::Malformed(v) => Err(format!("expected a number, got {}", json_type_name(v))),
        }
    }
}

impl From<f64> for ReadingValue {
    fn from(value: f64) -> Self {
        ReadingValue::Number(value)
    }
}

impl From<i32> for ReadingValue {
    fn from(value: i32) -> Self {
        ReadingValue::Number(value as f64)
    }
}

impl From<bool> for ReadingValue {
    fn from(value: bool) -> Self {
        ReadingValue::Flag(value)
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// ============================================================================
// RAW READING
// ============================================================================

/// One environmental reading. Read-only once received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawReading {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<ReadingValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<ReadingValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_days: Option<ReadingValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airflow: Option<ReadingValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dew_point: Option<ReadingValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambient_light: Option<ReadingValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pest_presence: Option<ReadingValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grain_moisture: Option<ReadingValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rainfall: Option<ReadingValue>,
}

impl RawReading {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field
    pub fn with(mut self, field: ReadingField, value: impl Into<ReadingValue>) -> Self {
        *self.slot_mut(field) = Some(value.into());
        self
    }

    /// Get a field as received
    pub fn get(&self, field: ReadingField) -> Option<&ReadingValue> {
        match field {
            ReadingField::Temperature => self.temperature.as_ref(),
            ReadingField::Humidity => self.humidity.as_ref(),
            ReadingField::StorageDays => self.storage_days.as_ref(),
            ReadingField::Airflow => self.airflow.as_ref(),
            ReadingField::DewPoint => self.dew_point.as_ref(),
            ReadingField::AmbientLight => self.ambient_light.as_ref(),
            ReadingField::PestPresence => self.pest_presence.as_ref(),
            ReadingField::GrainMoisture => self.grain_moisture.as_ref(),
            ReadingField::Rainfall => self.rainfall.as_ref(),
        }
    }

    fn slot_mut(&mut self, field: ReadingField) -> &mut Option<ReadingValue> {
        match field {
            ReadingField::Temperature => &mut self.temperature,
            ReadingField::Humidity => &mut self.humidity,
            ReadingField::StorageDays => &mut self.storage_days,
            ReadingField::Airflow => &mut self.airflow,
            ReadingField::DewPoint => &mut self.dew_point,
            ReadingField::AmbientLight => &mut self.ambient_light,
            ReadingField::PestPresence => &mut self.pest_presence,
            ReadingField::GrainMoisture => &mut self.grain_moisture,
            ReadingField::Rainfall => &mut self.rainfall,
        }
    }

    /// Apply defaults for missing fields and convert everything to numbers.
    ///
    /// Fails on the first field that cannot take part in arithmetic.
    pub fn resolve(&self) -> SpoilageResult<ResolvedReading> {
        let mut values = [0.0f64; FEATURE_COUNT];

        for field in ReadingField::ALL {
            values[field.index()] = match self.get(field) {
                None => field.default_value(),
                Some(value) => value
                    .to_number()
                    .map_err(|reason| SpoilageError::input(field.as_str(), reason))?,
            };
        }

        Ok(ResolvedReading { values })
    }

    /// Built-in example reading used when the command surface gets no input
    pub fn example() -> Self {
        Self::new()
            .with(ReadingField::Temperature, 28.0)
            .with(ReadingField::Humidity, 75.0)
            .with(ReadingField::GrainMoisture, 16.0)
            .with(ReadingField::DewPoint, 22.0)
            .with(ReadingField::StorageDays, 20.0)
            .with(ReadingField::Airflow, 1.2)
            .with(ReadingField::AmbientLight, 150.0)
            .with(ReadingField::PestPresence, 0.0)
            .with(ReadingField::Rainfall, 0.5)
    }
}

// ============================================================================
// RESOLVED READING
// ============================================================================

/// A reading with defaults applied. Values are raw: nothing is clamped here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedReading {
    values: [f64; FEATURE_COUNT],
}

impl ResolvedReading {
    pub fn get(&self, field: ReadingField) -> f64 {
        self.values[field.index()]
    }

    pub fn temperature(&self) -> f64 {
        self.get(ReadingField::Temperature)
    }

    pub fn humidity(&self) -> f64 {
        self.get(ReadingField::Humidity)
    }

    pub fn grain_moisture(&self) -> f64 {
        self.get(ReadingField::GrainMoisture)
    }

    pub fn storage_days(&self) -> f64 {
        self.get(ReadingField::StorageDays)
    }

    /// Iterate (field, value) in classifier order
    pub fn iter(&self) -> impl Iterator<Item = (ReadingField, f64)> + '_ {
        ReadingField::ALL.iter().map(move |f| (*f, self.get(*f)))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_reading_resolves_to_defaults() {
        let resolved = RawReading::new().resolve().unwrap();
        let values: Vec<f64> = resolved.iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec![25.0, 60.0, 1.0, 1.0, 20.0, 100.0, 0.0, 15.0, 0.0]);
    }

    #[test]
    fn test_deserialize_partial_reading() {
        let reading: RawReading = serde_json::from_value(json!({
            "temperature": 31.5,
            "pest_presence": 2,
            "co2": 900
        }))
        .unwrap();

        let resolved = reading.resolve().unwrap();
        assert_eq!(resolved.temperature(), 31.5);
        assert_eq!(resolved.get(ReadingField::PestPresence), 2.0);
        assert_eq!(resolved.humidity(), 60.0);
    }

    #[test]
    fn test_null_is_missing() {
        let reading: RawReading = serde_json::from_value(json!({ "humidity": null })).unwrap();
        assert!(reading.humidity.is_none());
        assert_eq!(reading.resolve().unwrap().humidity(), 60.0);
    }

    #[test]
    fn test_bool_reads_as_flag() {
        let reading: RawReading = serde_json::from_value(json!({ "pest_presence": true })).unwrap();
        assert_eq!(reading.resolve().unwrap().get(ReadingField::PestPresence), 1.0);
    }

    #[test]
    fn test_string_is_kept_then_rejected_on_resolve() {
        let reading: RawReading = serde_json::from_value(json!({ "temperature": "hot" })).unwrap();
        assert!(matches!(reading.temperature, Some(ReadingValue::Malformed(_))));

        let err = reading.resolve().unwrap_err();
        assert_eq!(
            err,
            SpoilageError::input("temperature", "expected a number, got string")
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        let reading = RawReading::new().with(ReadingField::Airflow, f64::NAN);
        assert!(matches!(reading.resolve(), Err(SpoilageError::Input { .. })));
    }

    #[test]
    fn test_implausible_values_pass_through() {
        let reading = RawReading::new()
            .with(ReadingField::StorageDays, -5.0)
            .with(ReadingField::Temperature, 200.0);
        let resolved = reading.resolve().unwrap();
        assert_eq!(resolved.storage_days(), -5.0);
        assert_eq!(resolved.temperature(), 200.0);
    }
}
