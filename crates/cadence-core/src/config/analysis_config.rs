//! Pattern-detection configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the pattern detectors and the validator/comparator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum records per detector. Default: 2.
    pub min_records: Option<usize>,
    /// Minimum confidence kept by validation. Default: 0.60.
    pub min_pattern_confidence: Option<f64>,
    /// Similarity needed to merge patterns across sets. Default: 0.80.
    pub merge_similarity: Option<f64>,
    /// Dominant technique share for the cognitive detector. Default: 0.60.
    pub dominance_threshold: Option<f64>,
    /// Normalized slope for increasing/decreasing. Default: 0.10.
    pub trend_slope_threshold: Option<f64>,
    /// Points before seasonality is reported. Default: 12.
    pub seasonality_min_points: Option<usize>,
}

impl AnalysisConfig {
    pub fn effective_min_records(&self) -> usize {
        self.min_records.unwrap_or(constants::DEFAULT_MIN_RECORDS).max(2)
    }

    pub fn effective_min_pattern_confidence(&self) -> f64 {
        self.min_pattern_confidence
            .unwrap_or(constants::DEFAULT_MIN_PATTERN_CONFIDENCE)
    }

    pub fn effective_merge_similarity(&self) -> f64 {
        self.merge_similarity
            .unwrap_or(constants::DEFAULT_MERGE_SIMILARITY)
    }

    pub fn effective_dominance_threshold(&self) -> f64 {
        self.dominance_threshold
            .unwrap_or(constants::DEFAULT_DOMINANCE_THRESHOLD)
    }

    pub fn effective_trend_slope_threshold(&self) -> f64 {
        self.trend_slope_threshold
            .unwrap_or(constants::DEFAULT_TREND_SLOPE_THRESHOLD)
    }

    pub fn effective_seasonality_min_points(&self) -> usize {
        self.seasonality_min_points
            .unwrap_or(constants::DEFAULT_SEASONALITY_MIN_POINTS)
    }
}
