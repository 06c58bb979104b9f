//! Result Composer
//!
//! Turns the validated distribution and the survival estimate into the
//! outward report. Pure: the invocation time is passed in.

use chrono::{DateTime, SecondsFormat, Utc};

use super::types::{RiskFactor, SpoilageReport, SurvivalEstimate};
use crate::logic::features::FEATURE_COUNT;
use crate::logic::model::{ClassProbabilities, SpoilageClass};

pub const METHOD_SEVERITY_ADJUSTED: &str = "probability_weighted_severity_adjusted";

/// Round half away from zero to `places` decimals
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// round(100 × p), capped at 100
pub fn risk_score(probability: f64) -> u8 {
    (probability * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Sortable textual timestamp (RFC 3339, UTC, microseconds)
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn compose(
    prediction: SpoilageClass,
    probabilities: &ClassProbabilities,
    estimate: &SurvivalEstimate,
    key_risk_factors: Vec<RiskFactor>,
    model_used: &str,
    at: DateTime<Utc>,
) -> SpoilageReport {
    SpoilageReport {
        prediction,
        confidence: probabilities.max(),
        risk_score: risk_score(probabilities.get(prediction)),
        time_to_spoilage_hours: estimate.time_to_spoilage_hours,
        time_to_spoilage_method: METHOD_SEVERITY_ADJUSTED.to_string(),
        class_probabilities: Some(probabilities.map(|p| round_to(p, 4))),
        key_risk_factors,
        severity_factor: round_to(estimate.severity_factor, 3),
        weighted_base_hours: round_to(estimate.weighted_hours, 1),
        model_used: model_used.to_string(),
        features_used: FEATURE_COUNT,
        timestamp: format_timestamp(at),
        error: None,
    }
}
