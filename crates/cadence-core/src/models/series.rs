//! Historical numeric series returned by the time-series provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// An ordered series for one clinical indicator (e.g. `"phq9_score"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    pub indicator: String,
    pub points: Vec<TimeSeriesPoint>,
}

impl HistoricalSeries {
    pub fn new(indicator: impl Into<String>, points: Vec<TimeSeriesPoint>) -> Self {
        Self {
            indicator: indicator.into(),
            points,
        }
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}
