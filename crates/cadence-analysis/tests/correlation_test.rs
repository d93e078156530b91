//! Correlation matrix properties and the risk-factor analyzer.

use cadence_analysis::correlation::{CorrelationMatrix, FALLBACK_FACTOR};
use cadence_analysis::features::emotion_features;
use cadence_analysis::PatternEngine;
use cadence_core::errors::{AnalysisError, ProviderError};
use cadence_core::models::*;
use cadence_core::traits::InMemoryProvider;
use cadence_core::AnalysisContext;
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn analysis(i: i64, valence: f64, arousal: f64, dominance: f64, confidence: f64) -> EmotionAnalysis {
    EmotionAnalysis {
        id: format!("ea-{i}"),
        timestamp: base() + Duration::hours(6 * i),
        emotions: EmotionVector {
            valence,
            arousal,
            dominance,
        },
        confidence,
    }
}

/// Valence falls while arousal rises; dominance wobbles.
fn coupled(n: i64) -> Vec<EmotionAnalysis> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;
            let wobble = if i % 2 == 0 { 0.05 } else { -0.05 };
            analysis(i, 0.8 - t, 0.1 + 0.8 * t + wobble / 5.0, 0.5 + wobble, 0.9)
        })
        .collect()
}

fn emotion_vec() -> impl Strategy<Value = Vec<EmotionAnalysis>> {
    prop::collection::vec(
        (-1.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0),
        1..30,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (v, a, d, c))| analysis(i as i64, v, a, d, c))
            .collect()
    })
}

proptest! {
    #[test]
    fn matrix_is_symmetric_with_unit_diagonal(analyses in emotion_vec()) {
        let matrix = CorrelationMatrix::build(&emotion_features(&analyses));
        prop_assert!(matrix.is_symmetric(0.0));
        for i in 0..matrix.size() {
            prop_assert_eq!(matrix.get(i, i), 1.0);
            for j in 0..matrix.size() {
                prop_assert!((-1.0..=1.0).contains(&matrix.get(i, j)));
            }
        }
    }

    #[test]
    fn correlation_records_stay_in_bounds(analyses in emotion_vec()) {
        let engine = PatternEngine::with_defaults();
        let ctx = AnalysisContext::new("prop-client");
        let outcome = engine.analyze_risk_factor_correlations(&ctx, &analyses);
        for c in outcome.value() {
            prop_assert!(!c.correlated_factors.is_empty() || c.primary_factor == FALLBACK_FACTOR);
            for f in &c.correlated_factors {
                prop_assert!((-1.0..=1.0).contains(&f.coefficient));
                prop_assert!((0.0..=1.0).contains(&f.confidence));
                prop_assert!((0.0..=1.0).contains(&f.p_value));
            }
            let m = &c.metrics;
            prop_assert!((-1.0..=1.0).contains(&m.pearson));
            prop_assert!((-1.0..=1.0).contains(&m.spearman));
            prop_assert!((-1.0..=1.0).contains(&m.kendall));
            prop_assert!(m.confidence_interval.0 <= m.confidence_interval.1);
        }
    }
}

#[test]
fn strong_coupling_is_flagged() {
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-r");
    let outcome = engine.analyze_risk_factor_correlations(&ctx, &coupled(20));
    assert!(outcome.is_complete());
    let correlations = outcome.into_value();

    let valence = correlations
        .iter()
        .find(|c| c.primary_factor == "valence")
        .expect("valence correlations");
    let arousal = valence
        .correlated_factors
        .iter()
        .find(|f| f.factor == "arousal")
        .expect("arousal correlate");
    assert!(arousal.coefficient < -0.9);
    assert_eq!(arousal.effect_size, EffectSize::Large);
    assert!(arousal.p_value < 0.001);
    assert_eq!(valence.severity, Severity::Critical);
    assert!(valence.action_required);
    assert_eq!(valence.metrics.sample_size, 20);
    assert!(valence.metrics.spearman < -0.9);

    // strongest correlate first
    let coefficients: Vec<f64> = valence
        .correlated_factors
        .iter()
        .map(|f| f.coefficient.abs())
        .collect();
    assert!(coefficients.windows(2).all(|w| w[0] >= w[1]));

    // results ordered by severity
    assert!(correlations.windows(2).all(|w| w[0].severity >= w[1].severity));
    assert!((valence.time_frame.duration_days - 4.75).abs() < 1e-9);
}

#[test]
fn constant_confidence_has_no_correlates() {
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-r");
    let correlations = engine
        .analyze_risk_factor_correlations(&ctx, &coupled(20))
        .into_value();
    assert!(correlations.iter().all(|c| c.primary_factor != "confidence"));
}

#[test]
fn small_samples_warn_but_proceed() {
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-s");
    let outcome = engine.analyze_risk_factor_correlations(&ctx, &coupled(5));
    assert!(outcome.is_complete());
    let correlations = outcome.into_value();
    assert!(!correlations.is_empty());
    assert!(correlations[0]
        .recommendations
        .iter()
        .any(|r| r.contains("at least 10")));
}

#[test]
fn fewer_than_three_is_insufficient() {
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-t");
    let outcome = engine.analyze_risk_factor_correlations(&ctx, &coupled(2));
    assert!(outcome.value().is_empty());
    assert!(matches!(
        outcome.reason(),
        Some(AnalysisError::InsufficientData { required: 3, actual: 2, .. })
    ));
}

#[test]
fn non_finite_input_is_rejected() {
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-u");
    let mut analyses = coupled(12);
    analyses[3].emotions.valence = f64::NAN;
    let outcome = engine.analyze_risk_factor_correlations(&ctx, &analyses);
    assert!(outcome.value().is_empty());
    assert!(matches!(outcome.reason(), Some(AnalysisError::InvalidInput { .. })));
}

#[tokio::test]
async fn provider_backed_correlations() {
    let provider = InMemoryProvider::new().with_analyses("client-v", coupled(20));
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-v");

    let outcome = engine
        .analyze_correlations_between(&ctx, &provider, base(), base() + Duration::days(30))
        .await;
    assert!(outcome.is_complete());
    assert!(!outcome.value().is_empty());
}

#[tokio::test]
async fn provider_failure_degrades_to_empty() {
    let provider = InMemoryProvider::new();
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("missing");

    let outcome = engine
        .analyze_correlations_between(&ctx, &provider, base(), base() + Duration::days(1))
        .await;
    assert!(outcome.value().is_empty());
    assert_eq!(
        outcome.reason(),
        Some(&AnalysisError::DataUnavailable(ProviderError::NotFound {
            client_id: "missing".into()
        }))
    );
}

#[tokio::test]
async fn inverted_range_is_invalid() {
    let provider = InMemoryProvider::new().with_analyses("client-w", coupled(20));
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-w");
    let outcome = engine
        .analyze_correlations_between(&ctx, &provider, base() + Duration::days(1), base())
        .await;
    assert!(matches!(outcome.reason(), Some(AnalysisError::InvalidInput { .. })));
}
