//! API Module
//!
//! JSON-in / JSON-out surface over the engine.
//!
//! Structure:
//! - commands.rs: request parsing and prediction
//! - engine_status.rs: status report (layout identity + engine counters)

pub mod commands;
pub mod engine_status;

pub use commands::*;
pub use engine_status::EngineStatusReport;
