//! Severity Adjuster
//!
//! Applies the environment penalties from `rules::SEVERITY_RULES` to the
//! weighted baseline. Uses raw (unclamped) signals.

use serde::{Deserialize, Serialize};

use super::rules::{MIN_TIME_TO_SPOILAGE_HOURS, SEVERITY_RULES};
use crate::error::{SpoilageError, SpoilageResult};
use crate::logic::features::{ReadingField, ResolvedReading};

/// One penalty that fired
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedPenalty {
    pub field: ReadingField,
    pub value: f64,
    pub threshold: f64,
    pub factor: f64,
}

impl std::fmt::Display for AppliedPenalty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={} (tier {}) x{}", self.field, self.value, self.threshold, self.factor)
    }
}

/// All penalties for a reading and their product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityAdjustment {
    pub penalties: Vec<AppliedPenalty>,
    pub severity_factor: f64,
}

/// Evaluate every signal's tiers; at most one penalty per signal
pub fn assess(reading: &ResolvedReading) -> SeverityAdjustment {
    let penalties: Vec<AppliedPenalty> = SEVERITY_RULES
        .iter()
        .filter_map(|rule| {
            let value = reading.get(rule.field);
            rule.evaluate(value).map(|tier| AppliedPenalty {
                field: rule.field,
                value,
                threshold: tier.threshold,
                factor: tier.outcome,
            })
        })
        .collect();

    let severity_factor: f64 = penalties.iter().map(|p| p.factor).product();

    SeverityAdjustment {
        penalties,
        severity_factor,
    }
}

/// max(1, floor(weighted_hours × severity_factor))
pub fn time_to_spoilage(weighted_hours: f64, severity_factor: f64) -> SpoilageResult<u64> {
    let adjusted = weighted_hours * severity_factor;

    if !adjusted.is_finite() || adjusted < 0.0 {
        return Err(SpoilageError::Computation(format!(
            "adjusted survival time not representable: {} x {}",
            weighted_hours, severity_factor
        )));
    }

    Ok((adjusted.floor() as u64).max(MIN_TIME_TO_SPOILAGE_HOURS))
}
