//! Fallback Handler
//!
//! Every failure inside the pipeline becomes a fixed, optimistic report.
//! The degraded state is carried explicitly in `Assessment` together with
//! the captured cause, so callers can tell a genuine low-risk result from a
//! masked failure. The same report is produced for every error class;
//! retryable and fatal causes are not differentiated.

use chrono::{DateTime, Utc};

use super::composer::format_timestamp;
use super::rules::{
    FALLBACK_CONFIDENCE, FALLBACK_METHOD, FALLBACK_RISK_SCORE, FALLBACK_TIME_TO_SPOILAGE_HOURS,
};
use super::types::SpoilageReport;
use crate::constants::FALLBACK_MODEL_NAME;
use crate::error::SpoilageError;
use crate::logic::features::FEATURE_COUNT;
use crate::logic::model::SpoilageClass;

/// Outcome of one invocation. Always carries a well-formed report.
#[derive(Debug, Clone, PartialEq)]
pub enum Assessment {
    Assessed(SpoilageReport),
    Degraded {
        report: SpoilageReport,
        cause: SpoilageError,
    },
}

impl Assessment {
    pub fn degraded(cause: SpoilageError, at: DateTime<Utc>) -> Self {
        Assessment::Degraded {
            report: fallback_report(&cause, at),
            cause,
        }
    }

    pub fn report(&self) -> &SpoilageReport {
        match self {
            Assessment::Assessed(report) => report,
            Assessment::Degraded { report, .. } => report,
        }
    }

    pub fn into_report(self) -> SpoilageReport {
        match self {
            Assessment::Assessed(report) => report,
            Assessment::Degraded { report, .. } => report,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Assessment::Degraded { .. })
    }

    pub fn cause(&self) -> Option<&SpoilageError> {
        match self {
            Assessment::Assessed(_) => None,
            Assessment::Degraded { cause, .. } => Some(cause),
        }
    }
}

/// The fixed degraded report, with `error` set to the cause text
pub fn fallback_report(cause: &SpoilageError, at: DateTime<Utc>) -> SpoilageReport {
    SpoilageReport {
        prediction: SpoilageClass::Safe,
        confidence: FALLBACK_CONFIDENCE,
        risk_score: FALLBACK_RISK_SCORE,
        time_to_spoilage_hours: FALLBACK_TIME_TO_SPOILAGE_HOURS,
        time_to_spoilage_method: FALLBACK_METHOD.to_string(),
        class_probabilities: None,
        key_risk_factors: Vec::new(),
        severity_factor: 1.0,
        weighted_base_hours: FALLBACK_TIME_TO_SPOILAGE_HOURS as f64,
        model_used: FALLBACK_MODEL_NAME.to_string(),
        features_used: FEATURE_COUNT,
        timestamp: format_timestamp(at),
        error: Some(cause.to_string()),
    }
}
