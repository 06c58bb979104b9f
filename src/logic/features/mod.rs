//! Features Module - Feature Vector Builder
//!
//! Turns a loosely-typed reading into the fixed-order, clamped vector the
//! classifier was trained on.

pub mod layout;
pub mod reading;
pub mod vector;


// Re-export common types
pub use layout::{LayoutInfo, ReadingField, FEATURE_COUNT, FEATURE_LAYOUT};
pub use reading::{RawReading, ReadingValue, ResolvedReading};
pub use vector::{FeatureVector, FeatureVectorBuilder};
