//! Long-term trend analysis, decomposition, and change points.

use cadence_analysis::patterns::determine_trend;
use cadence_analysis::trends::detect_change_points;
use cadence_analysis::PatternEngine;
use cadence_core::config::{CadenceConfig, ChangePointMethod, TrendConfig};
use cadence_core::errors::AnalysisError;
use cadence_core::models::*;
use cadence_core::traits::InMemoryProvider;
use cadence_core::AnalysisContext;
use chrono::{DateTime, Duration, TimeZone, Utc};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()
}

fn series(indicator: &str, values: &[f64]) -> HistoricalSeries {
    HistoricalSeries::new(
        indicator,
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| TimeSeriesPoint {
                timestamp: base() + Duration::days(i as i64),
                value,
            })
            .collect(),
    )
}

fn step() -> Vec<f64> {
    let mut v = vec![0.0; 10];
    v.extend(vec![1.0; 10]);
    v
}

#[test]
fn linear_values_are_increasing() {
    let values: Vec<f64> = (1..=20).map(f64::from).collect();
    let trend = determine_trend(&values, 0.1);
    assert_eq!(trend.direction, TrendDirection::Increasing);
    assert!(trend.strength > 0.0);

    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-lin");
    let pattern = engine
        .analyze_trend_series(&ctx, &series("phq9_score", &values))
        .into_value()
        .expect("trend pattern");
    assert_eq!(pattern.analysis.direction, TrendShape::Increasing);
    assert_eq!(pattern.pattern_type, "increasing_trend");
    assert!((pattern.analysis.regression.slope - 1.0).abs() < 1e-9);
    assert!((pattern.analysis.regression.r_squared - 1.0).abs() < 1e-9);
    assert!(pattern.analysis.regression.p_value < 1e-6);
    assert!(pattern.confidence > 0.8 && pattern.confidence <= 1.0);
    assert_eq!(pattern.indicators, vec!["phq9_score".to_string()]);
    assert!(pattern.analysis.decomposition.is_some());
    assert_eq!(pattern.implications.severity, Severity::High);
    assert!(pattern.implications.escalation_required);
}

#[test]
fn step_series_has_one_change_point() {
    let s = series("mood", &step());
    let points = detect_change_points(&s.points, &TrendConfig::default());
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].index, 10);
    assert_eq!(points[0].change_type, ChangeType::LevelIncrease);
    assert_eq!(points[0].confidence, 0.8);
    assert_eq!(points[0].timestamp, base() + Duration::days(10));
}

#[test]
fn cusum_agrees_on_the_step() {
    let config = TrendConfig {
        change_point_method: ChangePointMethod::Cusum,
        ..TrendConfig::default()
    };
    let s = series("mood", &step());
    let points = detect_change_points(&s.points, &config);
    assert_eq!(points.len(), 1);
    assert!((9..=11).contains(&points[0].index));
}

#[test]
fn oscillating_series_is_recognised() {
    let values: Vec<f64> = (0..21).map(|i| if i % 2 == 0 { 3.0 } else { 7.0 }).collect();
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-osc");
    let pattern = engine
        .analyze_trend_series(&ctx, &series("sleep_hours", &values))
        .into_value()
        .expect("trend pattern");
    assert_eq!(pattern.analysis.direction, TrendShape::Oscillating);
    assert!((0.0..=1.0).contains(&pattern.confidence));
}

#[test]
fn decomposition_components_reconstruct_series() {
    let values: Vec<f64> = (0..28)
        .map(|t| 5.0 + (std::f64::consts::TAU * t as f64 / 7.0).cos())
        .collect();
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-dec");
    let pattern = engine
        .analyze_trend_series(&ctx, &series("gad7_score", &values))
        .into_value()
        .expect("trend pattern");
    let d = pattern.analysis.decomposition.expect("decomposition");
    for (t, v) in values.iter().enumerate() {
        assert!((d.trend[t] + d.seasonal[t] + d.residual[t] - v).abs() < 1e-9);
    }
    assert!((0.0..=1.0).contains(&d.seasonality_strength));
}

#[test]
fn short_series_is_insufficient() {
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-short");
    let outcome = engine.analyze_trend_series(&ctx, &series("mood", &[1.0, 2.0]));
    assert!(outcome.value().is_none());
    assert!(matches!(
        outcome.reason(),
        Some(AnalysisError::InsufficientData { required: 3, actual: 2, .. })
    ));
}

#[test]
fn ids_are_stable_across_calls() {
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-id");
    let s = series("mood", &step());
    let a = engine.analyze_trend_series(&ctx, &s).into_value().expect("pattern");
    let b = engine.analyze_trend_series(&ctx, &s).into_value().expect("pattern");
    assert_eq!(a.id, b.id);
    assert!(a.id.starts_with("trend-"));
}

#[test]
fn many_change_points_raise_severity() {
    let mut values = vec![0.0; 10];
    values.extend(vec![2.0; 10]);
    values.extend(vec![0.0; 10]);
    let config = CadenceConfig::default();
    let engine = PatternEngine::new(config);
    let ctx = AnalysisContext::new("client-cp");
    let pattern = engine
        .analyze_trend_series(&ctx, &series("mood", &values))
        .into_value()
        .expect("pattern");
    assert_eq!(pattern.analysis.change_points.len(), 2);
    assert!(pattern.implications.severity >= Severity::Medium);
    assert!(pattern.implications.follow_up_required);
}

#[tokio::test]
async fn long_term_trends_from_provider() {
    let rising: Vec<f64> = (0..30).map(|i| 10.0 + i as f64).collect();
    let provider = InMemoryProvider::new().with_series(
        "client-lt",
        vec![series("phq9_score", &rising), series("mood", &step())],
    );
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-lt");

    let outcome = engine
        .analyze_long_term_trends(&ctx, &provider, base(), base() + Duration::days(60))
        .await;
    assert!(outcome.is_complete());
    let trends = outcome.into_value();
    assert_eq!(trends.len(), 2);
    for t in &trends {
        assert!((0.0..=1.0).contains(&t.confidence));
        assert!(t.start <= t.end);
    }
}

#[tokio::test]
async fn one_short_series_degrades_but_keeps_others() {
    let rising: Vec<f64> = (0..30).map(|i| i as f64).collect();
    let provider = InMemoryProvider::new().with_series(
        "client-deg",
        vec![series("phq9_score", &rising), series("mood", &[1.0])],
    );
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-deg");

    let outcome = engine
        .analyze_long_term_trends(&ctx, &provider, base(), base() + Duration::days(60))
        .await;
    assert!(!outcome.is_complete());
    assert_eq!(outcome.value().len(), 1);
    assert!(matches!(
        outcome.reason(),
        Some(AnalysisError::InsufficientData { .. })
    ));
}

#[tokio::test]
async fn unknown_client_degrades_to_empty() {
    let provider = InMemoryProvider::new();
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("ghost");
    let outcome = engine
        .analyze_long_term_trends(&ctx, &provider, base(), base() + Duration::days(1))
        .await;
    assert!(outcome.value().is_empty());
    assert!(matches!(outcome.reason(), Some(AnalysisError::DataUnavailable(_))));
}
