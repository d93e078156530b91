//! Per-message emotion analyses from the emotion-inference pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Valence / arousal / dominance coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmotionVector {
    pub valence: f64,
    pub arousal: f64,
    pub dominance: f64,
}

/// One emotion analysis. Immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionAnalysis {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub emotions: EmotionVector,
    /// Model confidence in [0, 1].
    pub confidence: f64,
}
