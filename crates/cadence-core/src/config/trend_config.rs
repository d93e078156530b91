use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Algorithm used to flag change points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChangePointMethod {
    /// Compare the means of adjacent sliding windows.
    #[default]
    MeanShift,
    /// Two-sided cumulative sum over the standardized series.
    Cusum,
}

impl ChangePointMethod {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MeanShift => "mean_shift",
            Self::Cusum => "cusum",
        }
    }
}

impl fmt::Display for ChangePointMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trend decomposition and change-point configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub moving_average_window: usize,
    pub seasonal_period: usize,
    pub change_point_window: usize,
    pub change_point_threshold: f64,
    pub change_point_method: ChangePointMethod,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            moving_average_window: constants::DEFAULT_MOVING_AVERAGE_WINDOW,
            seasonal_period: constants::DEFAULT_SEASONAL_PERIOD,
            change_point_window: constants::DEFAULT_CHANGE_POINT_WINDOW,
            change_point_threshold: constants::DEFAULT_CHANGE_POINT_THRESHOLD,
            change_point_method: ChangePointMethod::default(),
        }
    }
}
