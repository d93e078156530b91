//! Trend and seasonality classification for detector series.

use cadence_core::constants::{DEFAULT_SEASONAL_PERIOD, TIMELINE_SEASONALITY_CONFIDENCE};
use cadence_core::models::{Seasonality, TrendDirection};

use crate::stats::{normalized_slope, std_dev};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendAssessment {
    pub direction: TrendDirection,
    /// |normalized slope| clamped to [0, 1].
    pub strength: f64,
    pub normalized_slope: f64,
}

/// Classify a series by its normalized slope against `threshold`.
pub fn determine_trend(values: &[f64], threshold: f64) -> TrendAssessment {
    let slope = normalized_slope(values);
    let direction = if slope > threshold {
        TrendDirection::Increasing
    } else if slope < -threshold {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };
    TrendAssessment {
        direction,
        strength: slope.abs().min(1.0),
        normalized_slope: slope,
    }
}

/// Weekly seasonality, reported only once `min_points` are available.
pub fn detect_seasonality(values: &[f64], min_points: usize) -> Option<Seasonality> {
    if values.len() < min_points {
        return None;
    }
    Some(Seasonality {
        period: DEFAULT_SEASONAL_PERIOD,
        amplitude: std_dev(values),
        confidence: TIMELINE_SEASONALITY_CONFIDENCE,
    })
}
