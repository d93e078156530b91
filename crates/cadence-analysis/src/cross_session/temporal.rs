//! Frequent item pairs within sessions and item transitions between
//! consecutive sessions.
//!
//! Items are annotation tokens: `emotion:<state>`, `technique:<name>`,
//! `risk:<level>`.

use cadence_core::models::TherapySession;
use cadence_core::types::collections::{BTreeMap, BTreeSet};

/// Patterns kept per kind, strongest support first.
const MAX_PATTERNS_PER_KIND: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemsetKind {
    /// Both items annotated on the same session.
    CoOccurrence,
    /// First item on one session, second item on the next.
    Transition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemsetPattern {
    pub kind: ItemsetKind,
    pub items: (String, String),
    /// Fraction of sessions (or consecutive pairs) containing the pattern.
    pub support: f64,
    /// Contributing session indices, ascending.
    pub sessions: Vec<usize>,
}

fn session_items(session: &TherapySession) -> BTreeSet<String> {
    let mut items = BTreeSet::new();
    for state in session.emotional_states() {
        let state = state.trim().to_lowercase();
        if !state.is_empty() {
            items.insert(format!("emotion:{state}"));
        }
    }
    for technique in session.techniques() {
        let technique = technique.trim().to_lowercase();
        if !technique.is_empty() {
            items.insert(format!("technique:{technique}"));
        }
    }
    if let Some(risk) = session.risk_level() {
        items.insert(format!("risk:{risk}"));
    }
    items
}

fn top_patterns(
    counts: BTreeMap<(String, String), BTreeSet<usize>>,
    kind: ItemsetKind,
    denominator: usize,
    min_support: f64,
) -> Vec<ItemsetPattern> {
    let mut patterns: Vec<ItemsetPattern> = counts
        .into_iter()
        .filter_map(|(items, sessions)| {
            let support = sessions.len() as f64 / denominator as f64;
            (support >= min_support).then(|| ItemsetPattern {
                kind,
                items,
                support: support.min(1.0),
                sessions: sessions.into_iter().collect(),
            })
        })
        .collect();
    patterns.sort_by(|a, b| b.support.total_cmp(&a.support).then_with(|| a.items.cmp(&b.items)));
    patterns.truncate(MAX_PATTERNS_PER_KIND);
    patterns
}

/// Mine co-occurrences and transitions over sessions ordered by start time.
pub fn mine_itemsets(sessions: &[TherapySession], min_support: f64) -> Vec<ItemsetPattern> {
    let n = sessions.len();
    if n == 0 {
        return Vec::new();
    }
    let items: Vec<BTreeSet<String>> = sessions.iter().map(session_items).collect();

    let mut pairs: BTreeMap<(String, String), BTreeSet<usize>> = BTreeMap::new();
    for (s, set) in items.iter().enumerate() {
        let list: Vec<&String> = set.iter().collect();
        for (x, a) in list.iter().enumerate() {
            for b in &list[x + 1..] {
                pairs
                    .entry(((*a).clone(), (*b).clone()))
                    .or_default()
                    .insert(s);
            }
        }
    }

    // Keyed by the earlier session of each transition.
    let mut transitions: BTreeMap<(String, String), BTreeSet<usize>> = BTreeMap::new();
    for s in 0..n.saturating_sub(1) {
        for a in &items[s] {
            for b in &items[s + 1] {
                if a != b {
                    transitions
                        .entry((a.clone(), b.clone()))
                        .or_default()
                        .insert(s);
                }
            }
        }
    }

    let mut result = top_patterns(pairs, ItemsetKind::CoOccurrence, n, min_support);
    if n >= 2 {
        let mut sequences = top_patterns(transitions, ItemsetKind::Transition, n - 1, min_support);
        for pattern in &mut sequences {
            let expanded: BTreeSet<usize> =
                pattern.sessions.iter().flat_map(|&s| [s, s + 1]).collect();
            pattern.sessions = expanded.into_iter().collect();
        }
        result.extend(sequences);
    }
    result
}
