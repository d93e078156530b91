//! Risk-factor correlations.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::trend::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectSize {
    Small,
    Medium,
    Large,
}

impl EffectSize {
    /// |r| > 0.7 large, > 0.5 medium, otherwise small.
    pub fn from_coefficient(r: f64) -> Self {
        let abs = r.abs();
        if abs > 0.7 {
            Self::Large
        } else if abs > 0.5 {
            Self::Medium
        } else {
            Self::Small
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for EffectSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelatedFactor {
    pub factor: String,
    /// Pearson coefficient in [-1, 1].
    pub coefficient: f64,
    /// 1 - p, in [0, 1].
    pub confidence: f64,
    pub p_value: f64,
    pub effect_size: EffectSize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeFrame {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_days: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMetrics {
    pub sample_size: usize,
    pub pearson: f64,
    pub spearman: f64,
    pub kendall: f64,
    /// 95% interval for the Pearson coefficient (Fisher z).
    pub confidence_interval: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskCorrelation {
    pub primary_factor: String,
    /// Ordered by |coefficient|, strongest first.
    pub correlated_factors: Vec<CorrelatedFactor>,
    pub time_frame: TimeFrame,
    pub severity: Severity,
    pub action_required: bool,
    pub recommendations: Vec<String>,
    pub metrics: CorrelationMetrics,
}
