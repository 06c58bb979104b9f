//! Spoilage Engine
//!
//! Runs the whole pipeline for one reading inside a single failure
//! boundary:
//! reading → feature vector → classifier → survival estimate → severity →
//! risk factors → report.
//!
//! `assess` never fails and never panics past this boundary; every failure
//! comes back as `Assessment::Degraded` with the fixed fallback report.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::composer;
use super::factors;
use super::fallback::Assessment;
use super::severity;
use super::survival;
use super::types::{SpoilageReport, SurvivalEstimate};
use crate::config::EngineConfig;
use crate::error::{SpoilageError, SpoilageResult};
use crate::logic::features::{FeatureVector, RawReading};
use crate::logic::model::{ClassProbabilities, SharedClassifier, SpoilageClass, SpoilageClassifier};

// ============================================================================
// STATISTICS
// ============================================================================

/// Per-engine counters
#[derive(Debug, Default)]
pub struct EngineStats {
    invocations: AtomicU64,
    fallbacks: AtomicU64,
    latency_us: AtomicU64,
}

impl EngineStats {
    fn record(&self, elapsed: Duration, degraded: bool) {
        self.invocations.fetch_add(1, Ordering::Relaxed);
        if degraded {
            self.fallbacks.fetch_add(1, Ordering::Relaxed);
        }
        self.latency_us
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
    }
}

/// Engine status for callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub classifier_loaded: bool,
    pub model_name: String,
    pub invocations: u64,
    pub fallbacks: u64,
    pub avg_latency_ms: f64,
}

// ============================================================================
// ENGINE
// ============================================================================

pub struct SpoilageEngine {
    config: EngineConfig,
    classifier: SharedClassifier,
    stats: EngineStats,
}

impl SpoilageEngine {
    /// Classifier is loaded from `config.model_path` on first use
    pub fn new(config: EngineConfig) -> Self {
        Self {
            classifier: SharedClassifier::new(config.clone()),
            config,
            stats: EngineStats::default(),
        }
    }

    /// Engine over an already constructed classifier
    pub fn with_classifier(config: EngineConfig, classifier: Arc<dyn SpoilageClassifier>) -> Self {
        Self {
            classifier: SharedClassifier::preloaded(config.clone(), classifier),
            config,
            stats: EngineStats::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Assess one reading. Always returns a well-formed report.
    pub fn assess(&self, reading: &RawReading) -> Assessment {
        let started = Instant::now();
        let at = Utc::now();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.run_pipeline(reading, at)))
            .unwrap_or_else(|payload| Err(SpoilageError::Computation(panic_message(payload.as_ref()))));

        let assessment = match outcome {
            Ok(report) => Assessment::Assessed(report),
            Err(cause) => {
                log::warn!("Assessment degraded ({}): {}", cause.kind(), cause);
                Assessment::degraded(cause, at)
            }
        };

        self.stats.record(started.elapsed(), assessment.is_degraded());
        assessment
    }

    /// Assess readings independently, in order
    pub fn assess_batch(&self, readings: &[RawReading]) -> Vec<Assessment> {
        readings.iter().map(|reading| self.assess(reading)).collect()
    }

    /// Degraded assessment for a failure found before the pipeline could
    /// run, e.g. an unparseable request
    pub fn degraded(&self, cause: SpoilageError) -> Assessment {
        log::warn!("Assessment degraded ({}): {}", cause.kind(), cause);
        self.stats.record(Duration::ZERO, true);
        Assessment::degraded(cause, Utc::now())
    }

    pub fn stats(&self) -> EngineStatus {
        let invocations = self.stats.invocations.load(Ordering::Relaxed);
        let latency_us = self.stats.latency_us.load(Ordering::Relaxed);
        let avg_latency_ms = if invocations > 0 {
            (latency_us as f64 / invocations as f64) / 1000.0
        } else {
            0.0
        };

        EngineStatus {
            classifier_loaded: self.classifier.is_loaded(),
            model_name: self.config.model_name.clone(),
            invocations,
            fallbacks: self.stats.fallbacks.load(Ordering::Relaxed),
            avg_latency_ms,
        }
    }

    fn run_pipeline(&self, reading: &RawReading, at: DateTime<Utc>) -> SpoilageResult<SpoilageReport> {
        let resolved = reading.resolve()?;
        let features = FeatureVector::from_reading(&resolved);
        log::debug!("Feature vector: {}", features.to_log_entry());

        let classifier = self.classifier.get()?;
        let output = classifier.classify(&features)?;

        let probabilities = ClassProbabilities::try_from(output.probabilities.as_slice())?;
        if !probabilities.is_normalized() {
            log::warn!(
                "Class probabilities sum to {:.6}, expected 1.0",
                probabilities.sum()
            );
        }

        let prediction = SpoilageClass::from_index(output.class_index).ok_or_else(|| {
            SpoilageError::Computation(format!(
                "predicted class index {} out of range",
                output.class_index
            ))
        })?;

        let weighted_hours = survival::weighted_hours(&probabilities);
        let adjustment = severity::assess(&resolved);
        if !adjustment.penalties.is_empty() {
            let fired: Vec<String> = adjustment.penalties.iter().map(|p| p.to_string()).collect();
            log::debug!("Severity penalties: {}", fired.join(", "));
        }
        let estimate = SurvivalEstimate {
            weighted_hours,
            severity_factor: adjustment.severity_factor,
            time_to_spoilage_hours: severity::time_to_spoilage(
                weighted_hours,
                adjustment.severity_factor,
            )?,
        };

        let key_risk_factors = factors::identify(&resolved);

        log::debug!(
            "Assessed {}: {}h (weighted {:.1}h x {:.3}), {} risk factor(s)",
            prediction,
            estimate.time_to_spoilage_hours,
            estimate.weighted_hours,
            estimate.severity_factor,
            key_risk_factors.len()
        );

        Ok(composer::compose(
            prediction,
            &probabilities,
            &estimate,
            key_risk_factors,
            &self.config.model_name,
            at,
        ))
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    format!("panic during assessment: {}", detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "panic during assessment: boom");

        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("kaboom"));
        assert_eq!(panic_message(payload.as_ref()), "panic during assessment: kaboom");

        let payload: Box<dyn std::any::Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(payload.as_ref()), "panic during assessment: unknown panic");
    }

    #[test]
    fn test_stats_start_empty() {
        let engine = SpoilageEngine::new(EngineConfig::default());
        let status = engine.stats();
        assert_eq!(status.invocations, 0);
        assert_eq!(status.fallbacks, 0);
        assert_eq!(status.avg_latency_ms, 0.0);
        assert!(!status.classifier_loaded);
    }
}
