//! Long-term trend patterns.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shape of a long-term series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendShape {
    Increasing,
    Decreasing,
    Stable,
    Oscillating,
}

impl TrendShape {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
            Self::Oscillating => "oscillating",
        }
    }
}

impl fmt::Display for TrendShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Clinical severity, shared by trends and risk correlations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    /// Two-tailed p-value of the slope t-test.
    pub p_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalDecomposition {
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<f64>,
    pub seasonality_strength: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    LevelIncrease,
    LevelDecrease,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangePoint {
    pub timestamp: DateTime<Utc>,
    /// Position in the analysed series.
    pub index: usize,
    pub confidence: f64,
    pub change_type: ChangeType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmicAnalysis {
    pub direction: TrendShape,
    pub trend_strength: f64,
    pub regression: LinearRegression,
    pub decomposition: Option<SeasonalDecomposition>,
    /// Ordered by index.
    pub change_points: Vec<ChangePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalImplications {
    pub severity: Severity,
    pub intervention_window_days: u32,
    pub follow_up_required: bool,
    pub escalation_required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPattern {
    pub id: String,
    pub pattern_type: String,
    pub confidence: f64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub indicators: Vec<String>,
    pub description: String,
    pub analysis: AlgorithmicAnalysis,
    pub implications: ClinicalImplications,
}
