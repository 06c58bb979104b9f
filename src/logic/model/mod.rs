//! Model Module - Classifier Adapter
//!
//! Keeps inference separate from the spoilage rules so the backend can be
//! swapped without touching the estimation logic.

pub mod artifact;
pub mod classifier;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod shared;

// Re-export common types
pub use classifier::{ClassProbabilities, ClassifierOutput, SpoilageClass, SpoilageClassifier};
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;
pub use shared::SharedClassifier;
