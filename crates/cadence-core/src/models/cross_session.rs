//! Cross-session patterns from clustering, network, and co-occurrence mining.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    /// > 0.66 high, > 0.33 medium, otherwise low.
    pub fn from_magnitude(magnitude: f64) -> Self {
        if magnitude > 0.66 {
            Self::High
        } else if magnitude > 0.33 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAnalysis {
    pub central_session_ids: Vec<String>,
    /// Mean edge weight among the pattern's sessions, in [0, 1].
    pub connection_strength: f64,
    pub community_detected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedMetrics {
    pub cohesion_coefficient: f64,
    pub persistence_score: f64,
    pub evolution_rate: f64,
    pub clinical_magnitude: f64,
    pub network: NetworkAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalCharacteristics {
    pub is_cyclic: bool,
    pub period_days: Option<f64>,
    /// Offset of the first occurrence within one period, in [0, 1).
    pub phase_shift: f64,
    pub amplitude_variation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSessionPattern {
    pub id: String,
    pub pattern_type: String,
    pub session_ids: Vec<String>,
    pub description: String,
    pub frequency: f64,
    pub confidence: f64,
    pub impact: ImpactLevel,
    pub recommendations: Vec<String>,
    pub metrics: AdvancedMetrics,
    pub temporal: TemporalCharacteristics,
}
