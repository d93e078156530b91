//! Confidence gate over the union of detector outputs.

use cadence_core::models::PatternRecognitionResult;

/// Keep patterns whose confidence and mean confidence both reach
/// `min_confidence`. Records with no sessions or non-finite scores are dropped.
pub fn validate_patterns(
    patterns: Vec<PatternRecognitionResult>,
    min_confidence: f64,
) -> Vec<PatternRecognitionResult> {
    let before = patterns.len();
    let kept: Vec<PatternRecognitionResult> = patterns
        .into_iter()
        .filter(|p| {
            !p.session_ids.is_empty()
                && p.confidence.is_finite()
                && p.statistics.mean_confidence.is_finite()
                && p.confidence >= min_confidence
                && p.statistics.mean_confidence >= min_confidence
        })
        .collect();
    tracing::debug!(before, after = kept.len(), min_confidence, "validated patterns");
    kept
}
