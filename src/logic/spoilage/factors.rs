//! Risk Factor Identifier

use super::rules::RISK_FACTOR_RULES;
use super::types::RiskFactor;
use crate::logic::features::ResolvedReading;

/// Tags for every signal over a threshold, in fixed signal order
/// (temperature, humidity, grain moisture, pests, airflow, storage).
pub fn identify(reading: &ResolvedReading) -> Vec<RiskFactor> {
    RISK_FACTOR_RULES
        .iter()
        .filter_map(|rule| rule.evaluate(reading.get(rule.field)))
        .map(|tier| tier.outcome)
        .collect()
}
