//! Spoilage Module - Risk & Time-to-Spoilage Estimation
//!
//! Tier tables live in `rules.rs`; each stage of the estimate has its own
//! file and the engine wires them behind the fallback boundary.

pub mod composer;
pub mod engine;
pub mod factors;
pub mod fallback;
pub mod risk_level;
pub mod rules;
pub mod severity;
pub mod survival;
pub mod types;


// Re-export common types
pub use engine::{EngineStats, EngineStatus, SpoilageEngine};
pub use fallback::{fallback_report, Assessment};
pub use risk_level::{RiskLevel, RiskLevelDetails};
pub use severity::{AppliedPenalty, SeverityAdjustment};
pub use types::{RiskFactor, SpoilageReport, SurvivalEstimate};
