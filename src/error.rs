//! Error handling

use thiserror::Error;

pub type SpoilageResult<T> = Result<T, SpoilageError>;

/// Failures anywhere in the assessment pipeline.
///
/// None of these reach the caller of `SpoilageEngine::assess`; they are
/// captured as the cause of a degraded assessment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpoilageError {
    /// Malformed reading field
    #[error("invalid input field '{field}': {reason}")]
    Input { field: String, reason: String },

    /// Artifact missing, unreadable, corrupt or checksum mismatch
    #[error("classifier load failed: {0}")]
    ClassifierLoad(String),

    /// Feature shape mismatch or output extraction failure
    #[error("classifier inference failed: {0}")]
    ClassifierInference(String),

    /// Unexpected numeric fault
    #[error("computation failed: {0}")]
    Computation(String),
}

impl SpoilageError {
    pub fn input(field: &str, reason: impl Into<String>) -> Self {
        SpoilageError::Input {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Stable snake_case name of the error class
    pub fn kind(&self) -> &'static str {
        match self {
            SpoilageError::Input { .. } => "input_error",
            SpoilageError::ClassifierLoad(_) => "classifier_load_error",
            SpoilageError::ClassifierInference(_) => "classifier_inference_error",
            SpoilageError::Computation(_) => "computation_error",
        }
    }
}
