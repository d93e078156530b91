//! Feature extraction: records to numeric vectors.

pub mod emotion_features;
pub mod matrix;
pub mod session_features;

pub use emotion_features::{emotion_features, EMOTION_FEATURES};
pub use matrix::FeatureMatrix;
pub use session_features::{mining_features, session_features, MINING_FEATURES, SESSION_FEATURES};
