//! Survival-Time Estimator
//!
//! Baseline remaining life weighted over the whole class distribution, not
//! just the predicted class. The estimate degrades smoothly as probability
//! mass moves toward a worse class instead of jumping at the decision
//! boundary.

use super::rules::base_hours;
use crate::logic::model::{ClassProbabilities, SpoilageClass};

/// Σ p(class) × base_hours(class)
pub fn weighted_hours(probabilities: &ClassProbabilities) -> f64 {
    SpoilageClass::ALL
        .iter()
        .map(|&class| probabilities.get(class) * base_hours(class))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_certain_classes_give_base_hours() {
        assert!(approx(weighted_hours(&ClassProbabilities::new(1.0, 0.0, 0.0)), 720.0));
        assert!(approx(weighted_hours(&ClassProbabilities::new(0.0, 1.0, 0.0)), 168.0));
        assert!(approx(weighted_hours(&ClassProbabilities::new(0.0, 0.0, 1.0)), 24.0));
    }

    #[test]
    fn test_weighted_mix() {
        let hours = weighted_hours(&ClassProbabilities::new(0.70, 0.25, 0.05));
        assert!(approx(hours, 0.70 * 720.0 + 0.25 * 168.0 + 0.05 * 24.0));
        assert!(approx(hours, 547.2));
    }

    #[test]
    fn test_no_step_at_decision_boundary() {
        // 51/49 Safe vs Risky sits between the two baselines, far from 720
        let hours = weighted_hours(&ClassProbabilities::new(0.51, 0.49, 0.0));
        assert!(hours < 500.0);
        assert!(hours > 168.0);

        let just_over = weighted_hours(&ClassProbabilities::new(0.49, 0.51, 0.0));
        assert!((hours - just_over).abs() < 12.0);
    }

    #[test]
    fn test_shift_toward_worse_class_reduces_hours() {
        let mut previous = f64::MAX;
        for step in 0..=10 {
            let spoiled = step as f64 / 10.0;
            let hours = weighted_hours(&ClassProbabilities::new(1.0 - spoiled, 0.0, spoiled));
            assert!(hours <= previous);
            previous = hours;
        }
    }
}
