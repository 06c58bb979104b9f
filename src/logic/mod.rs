//! Logic Module - Estimation Engines
//!
//! - `features/` - Reading → fixed-order feature vector
//! - `model/` - Classifier adapter (ONNX backend, load-once handle)
//! - `spoilage/` - Survival estimate, severity rules, risk factors, fallback

pub mod features;
pub mod model;
pub mod spoilage;
