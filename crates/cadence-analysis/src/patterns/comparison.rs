//! Similarity scoring and one-to-one matching across two pattern sets.
//!
//! similarity = 0.3·[types match] + 0.4·Jaccard(description tokens)
//!            + 0.3·(1 − |Δconfidence|)

use std::cmp::Ordering;

use cadence_core::models::{PatternComparison, PatternRecognitionResult};
use cadence_core::types::collections::FxHashSet;
use cadence_core::types::deterministic_id;

const TYPE_WEIGHT: f64 = 0.3;
const TEXT_WEIGHT: f64 = 0.4;
const CONFIDENCE_WEIGHT: f64 = 0.3;

fn tokens(text: &str) -> FxHashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// J(A, B) = |A ∩ B| / |A ∪ B|; 0.0 if both are empty.
fn jaccard_similarity(a: &FxHashSet<String>, b: &FxHashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Symmetric similarity in [0, 1].
pub fn pattern_similarity(a: &PatternRecognitionResult, b: &PatternRecognitionResult) -> f64 {
    let type_score = if a.pattern_type == b.pattern_type { 1.0 } else { 0.0 };
    let text_score = jaccard_similarity(&tokens(&a.description), &tokens(&b.description));
    let confidence_score = 1.0 - (a.confidence - b.confidence).abs().min(1.0);
    (TYPE_WEIGHT * type_score + TEXT_WEIGHT * text_score + CONFIDENCE_WEIGHT * confidence_score)
        .clamp(0.0, 1.0)
}

/// Total order used to make matching independent of argument order.
fn canonical_order(a: &PatternRecognitionResult, b: &PatternRecognitionResult) -> Ordering {
    a.id.cmp(&b.id)
        .then_with(|| a.confidence.total_cmp(&b.confidence))
        .then_with(|| a.description.cmp(&b.description))
}

fn merge(a: &PatternRecognitionResult, b: &PatternRecognitionResult) -> PatternRecognitionResult {
    let (first, second) = if canonical_order(a, b) == Ordering::Greater {
        (b, a)
    } else {
        (a, b)
    };

    let mut merged = first.clone();
    merged.id = deterministic_id("merged", [first.id.as_str(), second.id.as_str()]);
    merged.session_ids.extend(second.session_ids.iter().cloned());
    merged.session_ids.sort();
    merged.session_ids.dedup();
    merged.confidence = ((first.confidence + second.confidence) / 2.0).clamp(0.0, 1.0);
    merged.statistics.mean_confidence =
        ((first.statistics.mean_confidence + second.statistics.mean_confidence) / 2.0)
            .clamp(0.0, 1.0);
    merged.timeline.first_occurrence = first
        .timeline
        .first_occurrence
        .min(second.timeline.first_occurrence);
    merged.timeline.last_occurrence = first
        .timeline
        .last_occurrence
        .max(second.timeline.last_occurrence);
    merged
}

/// Partition two pattern sets into merged common patterns and the
/// unmatched remainder of each side.
pub fn compare_pattern_sets(
    set_a: &[PatternRecognitionResult],
    set_b: &[PatternRecognitionResult],
    merge_threshold: f64,
) -> PatternComparison {
    let mut candidates: Vec<(f64, usize, usize)> = Vec::new();
    for (i, a) in set_a.iter().enumerate() {
        for (j, b) in set_b.iter().enumerate() {
            let sim = pattern_similarity(a, b);
            if sim >= merge_threshold {
                candidates.push((sim, i, j));
            }
        }
    }

    let ordered_pair = |i: usize, j: usize| {
        let (a, b) = (&set_a[i], &set_b[j]);
        if canonical_order(a, b) == Ordering::Greater {
            (b, a)
        } else {
            (a, b)
        }
    };
    candidates.sort_by(|x, y| {
        let (xa, xb) = ordered_pair(x.1, x.2);
        let (ya, yb) = ordered_pair(y.1, y.2);
        y.0.total_cmp(&x.0)
            .then_with(|| canonical_order(xa, ya))
            .then_with(|| canonical_order(xb, yb))
    });

    let mut used_a = vec![false; set_a.len()];
    let mut used_b = vec![false; set_b.len()];
    let mut common = Vec::new();
    for (_, i, j) in candidates {
        if used_a[i] || used_b[j] {
            continue;
        }
        used_a[i] = true;
        used_b[j] = true;
        common.push(merge(&set_a[i], &set_b[j]));
    }
    common.sort_by(|a, b| a.id.cmp(&b.id));

    let unique = |set: &[PatternRecognitionResult], used: &[bool]| {
        set.iter()
            .zip(used)
            .filter(|(_, used)| !**used)
            .map(|(p, _)| p.clone())
            .collect::<Vec<_>>()
    };

    PatternComparison {
        unique_a: unique(set_a, &used_a),
        unique_b: unique(set_b, &used_b),
        common,
    }
}
