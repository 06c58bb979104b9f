//! Grain Spoilage - Risk & Time-to-Spoilage Estimation
//!
//! Turns a stored-grain environmental reading plus a trained classifier's
//! class distribution into a spoilage report: predicted class, risk score,
//! remaining safe-storage hours and contributing risk factors.

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod logic;

pub use config::EngineConfig;
pub use error::{SpoilageError, SpoilageResult};
pub use logic::features::{FeatureVector, RawReading, ReadingField};
pub use logic::model::{ClassProbabilities, SpoilageClass, SpoilageClassifier};
pub use logic::spoilage::{Assessment, RiskFactor, RiskLevel, SpoilageEngine, SpoilageReport};
