//! Pattern recognition results produced by the detectors.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four pattern families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    Behavioral,
    Emotional,
    Cognitive,
    Communication,
}

impl PatternType {
    pub const ALL: [PatternType; 4] = [
        Self::Behavioral,
        Self::Emotional,
        Self::Cognitive,
        Self::Communication,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Behavioral => "behavioral",
            Self::Emotional => "emotional",
            Self::Cognitive => "cognitive",
            Self::Communication => "communication",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction of a pattern's underlying series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Seasonality {
    /// Period in records.
    pub period: usize,
    pub amplitude: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineAnalysis {
    pub first_occurrence: DateTime<Utc>,
    pub last_occurrence: DateTime<Utc>,
    /// Contributing sessions per week over the observed span.
    pub frequency: f64,
    pub trend: TrendDirection,
    /// |normalized slope| clamped to [0, 1].
    pub trend_strength: f64,
    pub seasonality: Option<Seasonality>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    None,
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalRelevance {
    pub significance: Significance,
    pub recommendation: String,
    pub intervention_suggested: bool,
    pub urgency: Urgency,
    /// confidence × frequency, in [0, 1].
    pub evidence_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternStatistics {
    pub mean_confidence: f64,
    pub standard_deviation: f64,
    pub outlier_count: usize,
    /// |Pearson r| of the tested series against its time index.
    pub correlation_strength: f64,
}

/// One recognized pattern. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRecognitionResult {
    pub id: String,
    pub pattern_type: PatternType,
    /// Specific finding, e.g. `emotional-regulation-improvement`.
    pub kind: String,
    pub description: String,
    /// Contributing sessions / analysed sessions.
    pub frequency: f64,
    pub confidence: f64,
    /// Sorted, de-duplicated, never empty.
    pub session_ids: Vec<String>,
    pub timeline: TimelineAnalysis,
    pub clinical_relevance: ClinicalRelevance,
    pub statistics: PatternStatistics,
}
