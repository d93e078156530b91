//! Detector sweep, validation, and comparison through `PatternEngine`.

use cadence_analysis::PatternEngine;
use cadence_core::config::CadenceConfig;
use cadence_core::errors::AnalysisError;
use cadence_core::models::*;
use cadence_core::tracing_setup::init_tracing;
use cadence_core::AnalysisContext;
use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

fn session(
    day: i64,
    minutes: i64,
    emotions: &[&str],
    techniques: &[&str],
    words: usize,
) -> TherapySession {
    let start = Utc.with_ymd_and_hms(2024, 4, 1, 15, 0, 0).unwrap() + Duration::days(day);
    TherapySession {
        id: format!("session-{day:03}"),
        start_time: start,
        end_time: start + Duration::minutes(minutes),
        transcript: vec!["word"; words].join(" "),
        annotations: Some(SessionAnnotations {
            risk_level: Some(RiskLevel::Medium),
            emotional_states: emotions.iter().map(|s| s.to_string()).collect(),
            techniques: techniques.iter().map(|s| s.to_string()).collect(),
        }),
    }
}

fn end_to_end_sessions() -> Vec<TherapySession> {
    vec![
        session(0, 30, &["anxious", "sad", "angry", "tired"], &[], 100),
        session(7, 90, &["anxious", "sad"], &[], 100),
        session(14, 45, &["calm"], &[], 100),
    ]
}

fn assert_bounds(p: &PatternRecognitionResult) {
    assert!((0.0..=1.0).contains(&p.confidence), "confidence {}", p.confidence);
    assert!((0.0..=1.0).contains(&p.frequency));
    assert!((0.0..=1.0).contains(&p.timeline.trend_strength));
    assert!((0.0..=1.0).contains(&p.clinical_relevance.evidence_score));
    assert!((0.0..=1.0).contains(&p.statistics.mean_confidence));
    assert!((0.0..=1.0).contains(&p.statistics.correlation_strength));
    assert!(!p.session_ids.is_empty());
}

#[test]
fn end_to_end_emotional_regulation_improvement() {
    init_tracing();
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-e2e");
    let sessions = end_to_end_sessions();

    let outcome = engine.detect_cross_session_patterns(&ctx, &sessions);
    assert!(outcome.is_complete());
    let patterns = outcome.into_value();

    let emotional: Vec<_> = patterns
        .iter()
        .filter(|p| p.kind == "emotional-regulation-improvement")
        .collect();
    assert!(!emotional.is_empty());
    for p in &emotional {
        assert!(!p.clinical_relevance.intervention_suggested);
        assert_eq!(p.clinical_relevance.significance, Significance::High);
        assert_eq!(p.timeline.trend, TrendDirection::Decreasing);
    }

    let input_ids: Vec<&str> = sessions.iter().map(|s| s.id.as_str()).collect();
    for p in &patterns {
        assert_bounds(p);
        assert!(p.session_ids.iter().all(|id| input_ids.contains(&id.as_str())));
    }
}

#[test]
fn behavioral_significance_follows_variance() {
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-b");

    // variance 650 > mean 55
    let high = engine.analyze_session_patterns(&ctx, &end_to_end_sessions()).into_value();
    let behavioral: Vec<_> = high
        .iter()
        .filter(|p| p.pattern_type == PatternType::Behavioral)
        .collect();
    assert_eq!(behavioral.len(), 1);
    assert_eq!(behavioral[0].clinical_relevance.significance, Significance::High);

    // durations 40 and 50: variance 25, mean 45, 22.5 < 25 <= 45
    let medium_sessions = vec![session(0, 40, &[], &[], 10), session(7, 50, &[], &[], 10)];
    let medium = engine.analyze_session_patterns(&ctx, &medium_sessions).into_value();
    let behavioral: Vec<_> = medium
        .iter()
        .filter(|p| p.pattern_type == PatternType::Behavioral)
        .collect();
    assert_eq!(behavioral.len(), 1);
    assert_eq!(behavioral[0].clinical_relevance.significance, Significance::Medium);
    assert!(!behavioral[0].clinical_relevance.intervention_suggested);
}

#[test]
fn cognitive_names_dominant_technique() {
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-c");
    let sessions = vec![
        session(0, 50, &[], &["grounding", "grounding"], 10),
        session(7, 50, &[], &["grounding", "journaling"], 10),
        session(14, 50, &[], &["grounding"], 10),
    ];
    let patterns = engine.analyze_session_patterns(&ctx, &sessions).into_value();
    let cognitive = patterns
        .iter()
        .find(|p| p.pattern_type == PatternType::Cognitive)
        .expect("cognitive pattern");
    assert!(cognitive.description.contains("grounding"));
}

#[test]
fn too_few_sessions_is_degraded_empty() {
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-d");

    for sessions in [vec![], vec![session(0, 30, &["a"], &["b"], 5)]] {
        let outcome = engine.analyze_session_patterns(&ctx, &sessions);
        assert!(outcome.value().is_empty());
        assert!(matches!(
            outcome.reason(),
            Some(AnalysisError::InsufficientData { required: 2, .. })
        ));
    }
}

#[test]
fn session_order_does_not_matter() {
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-e");
    let mut reversed = end_to_end_sessions();
    reversed.reverse();
    let a = engine.analyze_session_patterns(&ctx, &end_to_end_sessions()).into_value();
    let b = engine.analyze_session_patterns(&ctx, &reversed).into_value();
    assert_eq!(a, b);
}

#[test]
fn validation_uses_configured_threshold() {
    let config = CadenceConfig::from_toml("[analysis]\nmin_pattern_confidence = 0.7\n").unwrap();
    let strict = PatternEngine::new(config);
    let ctx = AnalysisContext::new("client-f");
    let patterns = strict
        .detect_cross_session_patterns(&ctx, &end_to_end_sessions())
        .into_value();
    // behavioral confidence is 0.6, emotional 0.8
    assert!(patterns.iter().all(|p| p.confidence >= 0.7));
    assert!(patterns
        .iter()
        .any(|p| p.kind == "emotional-regulation-improvement"));
    assert!(patterns.iter().all(|p| p.pattern_type != PatternType::Behavioral));
}

#[test]
fn compare_merges_identical_sets() {
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-g");
    let patterns = engine
        .analyze_session_patterns(&ctx, &end_to_end_sessions())
        .into_value();
    let comparison = engine.compare_patterns(&patterns, &patterns);
    assert_eq!(comparison.common.len(), patterns.len());
    assert!(comparison.unique_a.is_empty());
    assert!(comparison.unique_b.is_empty());
}

#[test]
fn compare_keeps_unrelated_patterns_apart() {
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-h");
    let a = engine
        .analyze_session_patterns(&ctx, &end_to_end_sessions())
        .into_value();
    let comparison = engine.compare_patterns(&a, &[]);
    assert!(comparison.common.is_empty());
    assert_eq!(comparison.unique_a.len(), a.len());
}

const WORDS: [&str; 6] = ["session", "anxiety", "improving", "duration", "technique", "mood"];

fn synthetic(
    index: usize,
    type_index: usize,
    words: &[usize],
    confidence: f64,
) -> PatternRecognitionResult {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    PatternRecognitionResult {
        id: format!("p-{index}-{type_index}-{}", (confidence * 1000.0) as u32),
        pattern_type: PatternType::ALL[type_index % 4],
        kind: "synthetic".into(),
        description: words.iter().map(|&w| WORDS[w % WORDS.len()]).collect::<Vec<_>>().join(" "),
        frequency: 1.0,
        confidence,
        session_ids: vec![format!("s{index}")],
        timeline: TimelineAnalysis {
            first_occurrence: at,
            last_occurrence: at,
            frequency: 1.0,
            trend: TrendDirection::Stable,
            trend_strength: 0.0,
            seasonality: None,
        },
        clinical_relevance: ClinicalRelevance {
            significance: Significance::Low,
            recommendation: String::new(),
            intervention_suggested: false,
            urgency: Urgency::None,
            evidence_score: confidence,
        },
        statistics: PatternStatistics {
            mean_confidence: confidence,
            standard_deviation: 0.0,
            outlier_count: 0,
            correlation_strength: 0.0,
        },
    }
}

fn pattern_set() -> impl Strategy<Value = Vec<PatternRecognitionResult>> {
    prop::collection::vec(
        (0usize..4, prop::collection::vec(0usize..6, 1..4), 0.0f64..=1.0),
        0..6,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (t, words, c))| synthetic(i, t, &words, c))
            .collect()
    })
}

proptest! {
    #[test]
    fn compare_is_commutative_on_common(a in pattern_set(), b in pattern_set()) {
        let engine = PatternEngine::with_defaults();
        let ab = engine.compare_patterns(&a, &b);
        let ba = engine.compare_patterns(&b, &a);
        prop_assert_eq!(&ab.common, &ba.common);
        prop_assert_eq!(ab.unique_a.len(), ba.unique_b.len());
        prop_assert_eq!(ab.common.len() + ab.unique_a.len(), a.len());
        prop_assert_eq!(ab.common.len() + ab.unique_b.len(), b.len());
        for p in &ab.common {
            prop_assert!((0.0..=1.0).contains(&p.confidence));
        }
    }
}

#[test]
fn outcomes_serialize_with_reason_text() {
    let engine = PatternEngine::with_defaults();
    let ctx = AnalysisContext::new("client-json");
    let outcome = engine.analyze_session_patterns(&ctx, &[]);
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["Degraded"]["value"], serde_json::json!([]));
    assert_eq!(
        json["Degraded"]["reason"],
        "pattern detection: insufficient data (need 2, got 0)"
    );

    let complete = engine.analyze_session_patterns(&ctx, &end_to_end_sessions());
    let json = serde_json::to_value(&complete).unwrap();
    let first = &json["Complete"][0];
    assert!(first["pattern_type"].is_string());
    assert!(first["clinical_relevance"]["urgency"].is_string());
}
