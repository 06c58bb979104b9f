//! ONNX Runtime classifier backend
//!
//! Expects a scikit-learn export with ZipMap disabled:
//! input `float32[1, 9]`, outputs `[label: int64[1], probabilities: float32[1, 3]]`.
//! A single-output graph is read as probabilities only.

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::artifact::verify_artifact;
use super::classifier::{ClassifierOutput, SpoilageClassifier};
use crate::config::EngineConfig;
use crate::error::{SpoilageError, SpoilageResult};
use crate::logic::features::{FeatureVector, FEATURE_COUNT};

/// Loaded ONNX classifier. Running a session needs exclusive access.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    label_output: Option<String>,
    proba_output: String,
}

impl OnnxClassifier {
    /// Load and verify the artifact named by the config
    pub fn load(config: &EngineConfig) -> SpoilageResult<Self> {
        let path = config.model_path.as_path();
        log::info!("Loading ONNX classifier from: {}", path.display());

        verify_artifact(path, config.model_sha256.as_deref())?;

        let session = Session::builder()
            .map_err(|e| load_error("Failed to create session builder", e))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| load_error("Failed to set optimization", e))?
            .with_intra_threads(config.intra_threads)
            .map_err(|e| load_error("Failed to set intra threads", e))?
            .commit_from_file(path)
            .map_err(|e| load_error("Failed to load model", e))?;

        let names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        let (label_output, proba_output) = match names.as_slice() {
            [] => {
                return Err(SpoilageError::ClassifierLoad("No output defined".to_string()));
            }
            [proba] => (None, proba.clone()),
            [label, proba, ..] => (Some(label.clone()), proba.clone()),
        };

        log::info!(
            "ONNX classifier loaded (label: {:?}, probabilities: {})",
            label_output,
            proba_output
        );

        Ok(Self {
            session: Mutex::new(session),
            label_output,
            proba_output,
        })
    }
}

impl SpoilageClassifier for OnnxClassifier {
    fn classify(&self, features: &FeatureVector) -> SpoilageResult<ClassifierOutput> {
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), features.as_slice().to_vec())
            .map_err(|e| inference_error("Array error", e))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| inference_error("Tensor error", e))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| inference_error("Inference failed", e))?;

        let proba = outputs
            .get(self.proba_output.as_str())
            .ok_or_else(|| SpoilageError::ClassifierInference(format!("Missing output '{}'", self.proba_output)))?
            .try_extract_tensor::<f32>()
            .map_err(|e| inference_error("Probability extract error", e))?;

        let probabilities: Vec<f64> = proba.1.iter().map(|&p| p as f64).collect();

        let class_index = match &self.label_output {
            Some(name) => {
                let label = outputs
                    .get(name.as_str())
                    .ok_or_else(|| SpoilageError::ClassifierInference(format!("Missing output '{}'", name)))?
                    .try_extract_tensor::<i64>()
                    .map_err(|e| inference_error("Label extract error", e))?;

                let raw = *label.1.first().ok_or_else(|| {
                    SpoilageError::ClassifierInference("Empty label output".to_string())
                })?;
                usize::try_from(raw).map_err(|_| {
                    SpoilageError::ClassifierInference(format!("Negative label: {}", raw))
                })?
            }
            None => argmax(&probabilities)?,
        };

        Ok(ClassifierOutput {
            class_index,
            probabilities,
        })
    }
}

fn argmax(values: &[f64]) -> SpoilageResult<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
        .ok_or_else(|| SpoilageError::Computation("empty probability vector".to_string()))
}

fn load_error(context: &str, e: impl std::fmt::Display) -> SpoilageError {
    SpoilageError::ClassifierLoad(format!("{}: {}", context, e))
}

fn inference_error(context: &str, e: impl std::fmt::Display) -> SpoilageError {
    SpoilageError::ClassifierInference(format!("{}: {}", context, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax() {
        assert_eq!(argmax(&[0.2, 0.5, 0.3]).unwrap(), 1);
        assert_eq!(argmax(&[0.5, 0.5, 0.0]).unwrap(), 0);
        assert!(argmax(&[]).is_err());
    }

    #[test]
    fn test_load_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::default().with_model_path(dir.path().join("missing.onnx"));

        match OnnxClassifier::load(&config) {
            Err(SpoilageError::ClassifierLoad(msg)) => assert!(msg.contains("Model not found")),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("loading a missing artifact must fail"),
        }
    }
}
