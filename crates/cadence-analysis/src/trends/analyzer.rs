//! Builds a `TrendPattern` for one historical indicator series.

use cadence_core::config::{AnalysisConfig, TrendConfig};
use cadence_core::errors::AnalysisError;
use cadence_core::models::{
    AlgorithmicAnalysis, ClinicalImplications, HistoricalSeries, LinearRegression, Severity,
    TrendDirection, TrendPattern, TrendShape,
};
use cadence_core::types::deterministic_id;

use super::change_points::detect_change_points;
use super::decomposition::decompose;
use crate::patterns::determine_trend;
use crate::stats::{coefficient_of_variation, linear_regression, slope_p_value};

const OPERATION: &str = "trend analysis";
const MIN_POINTS: usize = 3;
const OSCILLATION_MIN_POINTS: usize = 4;
const OSCILLATION_RATIO: f64 = 0.6;
const OSCILLATION_MIN_CV: f64 = 0.1;

/// Fraction of consecutive differences whose sign flips. Needs at least
/// three non-zero differences.
fn sign_change_ratio(values: &[f64]) -> f64 {
    let signs: Vec<f64> = values
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|d| *d != 0.0)
        .map(f64::signum)
        .collect();
    if signs.len() < 3 {
        return 0.0;
    }
    let flips = signs.windows(2).filter(|s| s[0] != s[1]).count();
    flips as f64 / (signs.len() - 1) as f64
}

fn bump(severity: Severity) -> Severity {
    match severity {
        Severity::Low => Severity::Medium,
        Severity::Medium => Severity::High,
        Severity::High | Severity::Critical => Severity::Critical,
    }
}

fn implications(strength: f64, change_points: usize) -> ClinicalImplications {
    let mut severity = if strength > 0.7 {
        Severity::High
    } else if strength > 0.4 {
        Severity::Medium
    } else {
        Severity::Low
    };
    if change_points >= 2 {
        severity = bump(severity);
    }
    let intervention_window_days = match severity {
        Severity::Critical => 3,
        Severity::High => 7,
        Severity::Medium => 14,
        Severity::Low => 30,
    };
    ClinicalImplications {
        severity,
        intervention_window_days,
        follow_up_required: severity >= Severity::Medium,
        escalation_required: severity >= Severity::High,
    }
}

/// Analyse one indicator series for `client_id`.
pub fn analyze_series(
    client_id: &str,
    series: &HistoricalSeries,
    analysis: &AnalysisConfig,
    trends: &TrendConfig,
) -> Result<TrendPattern, AnalysisError> {
    let mut points = series.points.clone();
    points.sort_by_key(|p| p.timestamp);
    let n = points.len();
    if n < MIN_POINTS {
        return Err(AnalysisError::insufficient(OPERATION, MIN_POINTS, n));
    }
    if points.iter().any(|p| !p.value.is_finite()) {
        return Err(AnalysisError::invalid_input(format!(
            "series '{}' contains non-finite values",
            series.indicator
        )));
    }

    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    let fit = linear_regression(&values);
    let p_value = slope_p_value(fit.slope, fit.slope_std_error, n)?;
    let assessment = determine_trend(&values, analysis.effective_trend_slope_threshold());
    let decomposition = decompose(&values, trends.seasonal_period, trends.moving_average_window);
    let change_points = detect_change_points(&points, trends);

    let cv = coefficient_of_variation(&values);
    let flips = sign_change_ratio(&values);
    let (direction, trend_strength, base) = match assessment.direction {
        TrendDirection::Increasing => (TrendShape::Increasing, assessment.strength, 1.0 - p_value),
        TrendDirection::Decreasing => (TrendShape::Decreasing, assessment.strength, 1.0 - p_value),
        TrendDirection::Stable
            if n >= OSCILLATION_MIN_POINTS
                && flips >= OSCILLATION_RATIO
                && cv > OSCILLATION_MIN_CV =>
        {
            let base = decomposition
                .as_ref()
                .map_or(flips, |d| d.seasonality_strength);
            (TrendShape::Oscillating, flips.min(1.0), base)
        }
        TrendDirection::Stable => (TrendShape::Stable, assessment.strength, 1.0 - cv.min(1.0)),
    };
    let confidence = (base * n as f64 / (n as f64 + 4.0)).clamp(0.0, 1.0);

    let start = points[0].timestamp;
    let end = points[n - 1].timestamp;
    let description = format!(
        "{} shows a {} trend (slope {:.3} per observation, R² {:.2}) with {} change point(s)",
        series.indicator,
        direction,
        fit.slope,
        fit.r_squared,
        change_points.len()
    );
    tracing::debug!(
        indicator = %series.indicator,
        %direction,
        confidence,
        change_points = change_points.len(),
        "trend analysed"
    );

    Ok(TrendPattern {
        id: deterministic_id(
            "trend",
            [
                client_id.to_string(),
                series.indicator.clone(),
                start.to_rfc3339(),
                end.to_rfc3339(),
            ],
        ),
        pattern_type: format!("{direction}_trend"),
        confidence,
        start,
        end,
        indicators: vec![series.indicator.clone()],
        description,
        implications: implications(trend_strength, change_points.len()),
        analysis: AlgorithmicAnalysis {
            direction,
            trend_strength,
            regression: LinearRegression {
                slope: fit.slope,
                intercept: fit.intercept,
                r_squared: fit.r_squared,
                p_value,
            },
            decomposition,
            change_points,
        },
    })
}
