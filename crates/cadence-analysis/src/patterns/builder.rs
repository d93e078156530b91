//! Turns a [`DetectorFinding`] into a `PatternRecognitionResult`.

use cadence_core::config::AnalysisConfig;
use cadence_core::models::{
    ClinicalRelevance, PatternRecognitionResult, PatternStatistics, TherapySession,
    TimelineAnalysis,
};
use cadence_core::types::deterministic_id;

use super::confidence::BetaPosterior;
use super::detectors::DetectorFinding;
use super::trend::{detect_seasonality, determine_trend};
use crate::stats::{outlier_count, pearson, std_dev};

/// Build the result record for `finding` over `sessions`.
///
/// Returns `None` when no contributing session can be resolved.
pub fn build_pattern(
    finding: &DetectorFinding,
    sessions: &[TherapySession],
    config: &AnalysisConfig,
) -> Option<PatternRecognitionResult> {
    let contributing: Vec<&TherapySession> = finding
        .supporting
        .iter()
        .filter_map(|&i| sessions.get(i))
        .collect();
    if contributing.is_empty() || sessions.is_empty() {
        return None;
    }

    let mut session_ids: Vec<String> = contributing.iter().map(|s| s.id.clone()).collect();
    session_ids.sort();
    session_ids.dedup();

    let id = deterministic_id(
        &finding.kind,
        std::iter::once(finding.pattern_type.name()).chain(session_ids.iter().map(String::as_str)),
    );

    let confidence = BetaPosterior::confidence(finding.evidence.successes, finding.evidence.total);
    let frequency = (contributing.len() as f64 / sessions.len() as f64).min(1.0);

    let first = contributing.iter().map(|s| s.start_time).min()?;
    let last = contributing.iter().map(|s| s.start_time).max()?;
    let span_weeks = ((last - first).num_seconds() as f64 / 86_400.0 / 7.0).max(1.0);
    let trend = determine_trend(&finding.series, config.effective_trend_slope_threshold());

    let timeline = TimelineAnalysis {
        first_occurrence: first,
        last_occurrence: last,
        frequency: contributing.len() as f64 / span_weeks,
        trend: trend.direction,
        trend_strength: trend.strength,
        seasonality: detect_seasonality(&finding.series, config.effective_seasonality_min_points()),
    };

    let index: Vec<f64> = (0..finding.series.len()).map(|i| i as f64).collect();
    let statistics = PatternStatistics {
        mean_confidence: confidence,
        standard_deviation: std_dev(&finding.series),
        outlier_count: outlier_count(&finding.series),
        correlation_strength: pearson(&index, &finding.series).abs(),
    };

    Some(PatternRecognitionResult {
        id,
        pattern_type: finding.pattern_type,
        kind: finding.kind.clone(),
        description: finding.description.clone(),
        frequency,
        confidence,
        session_ids,
        timeline,
        clinical_relevance: ClinicalRelevance {
            significance: finding.significance,
            recommendation: finding.recommendation.clone(),
            intervention_suggested: finding.intervention_suggested,
            urgency: finding.urgency,
            evidence_score: (confidence * frequency).clamp(0.0, 1.0),
        },
        statistics,
    })
}
