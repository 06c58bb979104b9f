//! Spoilage Types
//!
//! Data structures only - no estimation logic here.

use serde::{Deserialize, Serialize};

use super::risk_level::RiskLevel;
use crate::logic::model::{ClassProbabilities, SpoilageClass};

// ============================================================================
// RISK FACTORS
// ============================================================================

/// Human-readable tag for a raw signal that crossed a concerning threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    HighTemperature,
    ElevatedTemperature,
    HighHumidity,
    ElevatedHumidity,
    HighGrainMoisture,
    ElevatedGrainMoisture,
    PestPresence,
    LowAirflow,
    LongStorageDuration,
}

impl RiskFactor {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFactor::HighTemperature => "high_temperature",
            RiskFactor::ElevatedTemperature => "elevated_temperature",
            RiskFactor::HighHumidity => "high_humidity",
            RiskFactor::ElevatedHumidity => "elevated_humidity",
            RiskFactor::HighGrainMoisture => "high_grain_moisture",
            RiskFactor::ElevatedGrainMoisture => "elevated_grain_moisture",
            RiskFactor::PestPresence => "pest_presence",
            RiskFactor::LowAirflow => "low_airflow",
            RiskFactor::LongStorageDuration => "long_storage_duration",
        }
    }

    /// Primary concerns call for action; secondary ones for closer monitoring
    pub fn is_primary(&self) -> bool {
        matches!(
            self,
            RiskFactor::HighTemperature
                | RiskFactor::HighHumidity
                | RiskFactor::HighGrainMoisture
                | RiskFactor::PestPresence
        )
    }
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ESTIMATE
// ============================================================================

/// Survival-time figures before rounding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurvivalEstimate {
    /// Probability-weighted baseline hours
    pub weighted_hours: f64,
    /// Product of all applicable penalty factors, in (0, 1]
    pub severity_factor: f64,
    /// max(1, floor(weighted_hours * severity_factor))
    pub time_to_spoilage_hours: u64,
}

// ============================================================================
// SPOILAGE REPORT
// ============================================================================

/// Final assessment of one reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpoilageReport {
    pub prediction: SpoilageClass,
    pub confidence: f64,
    pub risk_score: u8,
    pub time_to_spoilage_hours: u64,
    pub time_to_spoilage_method: String,
    /// `null` on the fallback path: no distribution was produced
    pub class_probabilities: Option<ClassProbabilities>,
    pub key_risk_factors: Vec<RiskFactor>,
    pub severity_factor: f64,
    pub weighted_base_hours: f64,
    pub model_used: String,
    pub features_used: usize,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SpoilageReport {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }

    pub fn primary_risk_factors(&self) -> impl Iterator<Item = RiskFactor> + '_ {
        self.key_risk_factors.iter().copied().filter(RiskFactor::is_primary)
    }

    pub fn secondary_risk_factors(&self) -> impl Iterator<Item = RiskFactor> + '_ {
        self.key_risk_factors.iter().copied().filter(|f| !f.is_primary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_factor_wire_names() {
        for factor in [
            RiskFactor::HighTemperature,
            RiskFactor::ElevatedGrainMoisture,
            RiskFactor::LongStorageDuration,
        ] {
            let json = serde_json::to_value(factor).unwrap();
            assert_eq!(json, factor.as_str());
        }
    }

    #[test]
    fn test_primary_split() {
        assert!(RiskFactor::PestPresence.is_primary());
        assert!(RiskFactor::HighHumidity.is_primary());
        assert!(!RiskFactor::ElevatedHumidity.is_primary());
        assert!(!RiskFactor::LowAirflow.is_primary());
        assert!(!RiskFactor::LongStorageDuration.is_primary());
    }
}
