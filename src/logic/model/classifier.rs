//! Classifier Adapter
//!
//! The engine only sees this trait. The real backend is ONNX (`onnx.rs`);
//! tests plug in fixed distributions.

use serde::{Deserialize, Serialize};

use crate::constants::PROBABILITY_SUM_TOLERANCE;
use crate::error::{SpoilageError, SpoilageResult};
use crate::logic::features::FeatureVector;

// ============================================================================
// SPOILAGE CLASS
// ============================================================================

/// Classifier output classes, in probability-vector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpoilageClass {
    Safe,
    Risky,
    Spoiled,
}

impl SpoilageClass {
    pub const ALL: [SpoilageClass; 3] = [SpoilageClass::Safe, SpoilageClass::Risky, SpoilageClass::Spoiled];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpoilageClass::Safe => "Safe",
            SpoilageClass::Risky => "Risky",
            SpoilageClass::Spoiled => "Spoiled",
        }
    }
}

impl std::fmt::Display for SpoilageClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CLASS PROBABILITIES
// ============================================================================

/// Probability per class. Sums to 1 within `PROBABILITY_SUM_TOLERANCE`
/// for a well-formed classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    #[serde(rename = "Safe")]
    pub safe: f64,
    #[serde(rename = "Risky")]
    pub risky: f64,
    #[serde(rename = "Spoiled")]
    pub spoiled: f64,
}

impl ClassProbabilities {
    pub fn new(safe: f64, risky: f64, spoiled: f64) -> Self {
        Self { safe, risky, spoiled }
    }

    pub fn get(&self, class: SpoilageClass) -> f64 {
        match class {
            SpoilageClass::Safe => self.safe,
            SpoilageClass::Risky => self.risky,
            SpoilageClass::Spoiled => self.spoiled,
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.safe, self.risky, self.spoiled]
    }

    pub fn sum(&self) -> f64 {
        self.safe + self.risky + self.spoiled
    }

    /// Largest single probability
    pub fn max(&self) -> f64 {
        self.safe.max(self.risky).max(self.spoiled)
    }

    /// Most probable class (first wins on ties)
    pub fn argmax(&self) -> SpoilageClass {
        let mut best = SpoilageClass::Safe;
        for class in SpoilageClass::ALL {
            if self.get(class) > self.get(best) {
                best = class;
            }
        }
        best
    }

    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() <= PROBABILITY_SUM_TOLERANCE
    }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.safe), f(self.risky), f(self.spoiled))
    }
}

impl TryFrom<&[f64]> for ClassProbabilities {
    type Error = SpoilageError;

    fn try_from(values: &[f64]) -> SpoilageResult<Self> {
        if values.len() != SpoilageClass::ALL.len() {
            return Err(SpoilageError::Computation(format!(
                "expected {} class probabilities, got {}",
                SpoilageClass::ALL.len(),
                values.len()
            )));
        }

        for (class, &p) in SpoilageClass::ALL.iter().zip(values) {
            if !p.is_finite() || p < 0.0 || p > 1.0 + PROBABILITY_SUM_TOLERANCE {
                return Err(SpoilageError::Computation(format!(
                    "probability for {} out of range: {}",
                    class, p
                )));
            }
        }

        Ok(Self::new(values[0], values[1], values[2]))
    }
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Raw classifier answer, before validation
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierOutput {
    pub class_index: usize,
    pub probabilities: Vec<f64>,
}

/// A trained spoilage classifier.
///
/// Implementations must be safe to call from several threads; errors are
/// reported, never retried.
pub trait SpoilageClassifier: Send + Sync {
    /// Predicted class index and full distribution in one pass
    fn classify(&self, features: &FeatureVector) -> SpoilageResult<ClassifierOutput>;

    fn predict(&self, features: &FeatureVector) -> SpoilageResult<usize> {
        Ok(self.classify(features)?.class_index)
    }

    fn predict_proba(&self, features: &FeatureVector) -> SpoilageResult<Vec<f64>> {
        Ok(self.classify(features)?.probabilities)
    }
}

// ============================================================================
// TESTS
// ============================================================================
