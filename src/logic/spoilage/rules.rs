//! Spoilage Rules & Thresholds
//!
//! Constants and tier tables only - no estimation logic.
//!
//! Every signal is an ordered list of (threshold, outcome) pairs evaluated
//! top-down; the first match wins and at most one tier per signal applies.

use super::types::RiskFactor;
use crate::logic::features::ReadingField;
use crate::logic::model::SpoilageClass;

// ============================================================================
// BASELINE SURVIVAL TIMES (hours)
// ============================================================================

/// Safe: 30 days
pub const SAFE_BASE_HOURS: f64 = 720.0;

/// Risky: 7 days
pub const RISKY_BASE_HOURS: f64 = 168.0;

/// Spoiled: 1 day
pub const SPOILED_BASE_HOURS: f64 = 24.0;

/// Floor for the final estimate
pub const MIN_TIME_TO_SPOILAGE_HOURS: u64 = 1;

pub fn base_hours(class: SpoilageClass) -> f64 {
    match class {
        SpoilageClass::Safe => SAFE_BASE_HOURS,
        SpoilageClass::Risky => RISKY_BASE_HOURS,
        SpoilageClass::Spoiled => SPOILED_BASE_HOURS,
    }
}

// ============================================================================
// FALLBACK REPORT
// ============================================================================

pub const FALLBACK_CONFIDENCE: f64 = 0.6;
pub const FALLBACK_RISK_SCORE: u8 = 30;
pub const FALLBACK_TIME_TO_SPOILAGE_HOURS: u64 = 168;
pub const FALLBACK_METHOD: &str = "fallback_default";

// ============================================================================
// TIER RULES
// ============================================================================

/// Direction a signal must cross its threshold (strictly)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Above,
    Below,
}

impl Comparison {
    pub fn matches(&self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::Above => value > threshold,
            Comparison::Below => value < threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier<T> {
    pub threshold: f64,
    pub outcome: T,
}

/// Ordered tiers for one signal, most severe first
#[derive(Debug, Clone, Copy)]
pub struct TierRule<T: 'static> {
    pub field: ReadingField,
    pub comparison: Comparison,
    pub tiers: &'static [Tier<T>],
}

impl<T: 'static> TierRule<T> {
    /// First tier crossed by `value`, if any
    pub fn evaluate(&self, value: f64) -> Option<&'static Tier<T>> {
        self.tiers
            .iter()
            .find(|tier| self.comparison.matches(value, tier.threshold))
    }
}

const fn tier<T>(threshold: f64, outcome: T) -> Tier<T> {
    Tier { threshold, outcome }
}

// ============================================================================
// SEVERITY PENALTIES (multiplicative)
// ============================================================================

pub const SEVERITY_RULES: &[TierRule<f64>] = &[
    TierRule {
        field: ReadingField::Temperature,
        comparison: Comparison::Above,
        tiers: &[tier(35.0, 0.35), tier(30.0, 0.55), tier(28.0, 0.75)],
    },
    TierRule {
        field: ReadingField::Humidity,
        comparison: Comparison::Above,
        tiers: &[tier(85.0, 0.35), tier(80.0, 0.50), tier(70.0, 0.70)],
    },
    TierRule {
        field: ReadingField::GrainMoisture,
        comparison: Comparison::Above,
        tiers: &[tier(20.0, 0.40), tier(18.0, 0.60), tier(16.0, 0.80)],
    },
    TierRule {
        field: ReadingField::PestPresence,
        comparison: Comparison::Above,
        tiers: &[tier(0.0, 0.65)],
    },
    TierRule {
        field: ReadingField::Airflow,
        comparison: Comparison::Below,
        tiers: &[tier(0.2, 0.80)],
    },
    TierRule {
        field: ReadingField::StorageDays,
        comparison: Comparison::Above,
        tiers: &[tier(90.0, 0.70), tier(60.0, 0.85)],
    },
];

// ============================================================================
// RISK FACTOR TAGS (same boundaries, labels instead of factors)
// ============================================================================

/// Output order of the tags follows this table
pub const RISK_FACTOR_RULES: &[TierRule<RiskFactor>] = &[
    TierRule {
        field: ReadingField::Temperature,
        comparison: Comparison::Above,
        tiers: &[
            tier(30.0, RiskFactor::HighTemperature),
            tier(28.0, RiskFactor::ElevatedTemperature),
        ],
    },
    TierRule {
        field: ReadingField::Humidity,
        comparison: Comparison::Above,
        tiers: &[
            tier(80.0, RiskFactor::HighHumidity),
            tier(70.0, RiskFactor::ElevatedHumidity),
        ],
    },
    TierRule {
        field: ReadingField::GrainMoisture,
        comparison: Comparison::Above,
        tiers: &[
            tier(18.0, RiskFactor::HighGrainMoisture),
            tier(16.0, RiskFactor::ElevatedGrainMoisture),
        ],
    },
    TierRule {
        field: ReadingField::PestPresence,
        comparison: Comparison::Above,
        tiers: &[tier(0.0, RiskFactor::PestPresence)],
    },
    TierRule {
        field: ReadingField::Airflow,
        comparison: Comparison::Below,
        tiers: &[tier(0.2, RiskFactor::LowAirflow)],
    },
    TierRule {
        field: ReadingField::StorageDays,
        comparison: Comparison::Above,
        tiers: &[tier(60.0, RiskFactor::LongStorageDuration)],
    },
];

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_hours() {
        assert_eq!(base_hours(SpoilageClass::Safe), 720.0);
        assert_eq!(base_hours(SpoilageClass::Risky), 168.0);
        assert_eq!(base_hours(SpoilageClass::Spoiled), 24.0);
    }

    #[test]
    fn test_first_match_wins() {
        let temperature = &SEVERITY_RULES[0];
        assert_eq!(temperature.evaluate(36.0).map(|t| t.outcome), Some(0.35));
        assert_eq!(temperature.evaluate(31.0).map(|t| t.outcome), Some(0.55));
        assert_eq!(temperature.evaluate(29.0).map(|t| t.outcome), Some(0.75));
        assert_eq!(temperature.evaluate(28.0).map(|t| t.outcome), None);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let airflow = &SEVERITY_RULES[4];
        assert_eq!(airflow.field, ReadingField::Airflow);
        assert!(airflow.evaluate(0.2).is_none());
        assert_eq!(airflow.evaluate(0.19).map(|t| t.outcome), Some(0.80));

        let pests = &SEVERITY_RULES[3];
        assert!(pests.evaluate(0.0).is_none());
        assert!(pests.evaluate(1.0).is_some());
    }

    #[test]
    fn test_tiers_ordered_most_severe_first() {
        for rule in SEVERITY_RULES.iter() {
            for pair in rule.tiers.windows(2) {
                match rule.comparison {
                    Comparison::Above => assert!(pair[0].threshold > pair[1].threshold),
                    Comparison::Below => assert!(pair[0].threshold < pair[1].threshold),
                }
                assert!(pair[0].outcome < pair[1].outcome);
            }
            for tier in rule.tiers {
                assert!(tier.outcome > 0.0 && tier.outcome <= 1.0);
            }
        }
    }

    #[test]
    fn test_tag_rules_share_signal_order() {
        let severity_fields: Vec<_> = SEVERITY_RULES.iter().map(|r| r.field).collect();
        let tag_fields: Vec<_> = RISK_FACTOR_RULES.iter().map(|r| r.field).collect();
        assert_eq!(severity_fields, tag_fields);
    }
}
