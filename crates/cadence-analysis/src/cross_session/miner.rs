//! Combines clustering, the session network, and itemset mining into
//! `CrossSessionPattern` records.

use cadence_core::config::MiningConfig;
use cadence_core::errors::AnalysisError;
use cadence_core::models::{
    AdvancedMetrics, CrossSessionPattern, ImpactLevel, NetworkAnalysis, RiskLevel,
    TemporalCharacteristics, TherapySession,
};
use cadence_core::types::deterministic_id;

use super::clustering::{cluster_count, cluster_rows, euclidean};
use super::network::{has_community, SessionNetwork};
use super::temporal::{mine_itemsets, ItemsetKind};
use crate::features::mining_features;
use crate::stats::{coefficient_of_variation, mean};

const OPERATION: &str = "cross-session mining";
const CENTRAL_SESSIONS: usize = 3;
const CYCLIC_GAP_CV: f64 = 0.25;

/// Everything the per-pattern metrics need, computed once per call.
struct MiningContext<'a> {
    sessions: &'a [TherapySession],
    rows: Vec<Vec<f64>>,
    network: SessionNetwork,
    centrality: Vec<f64>,
    communities: Vec<usize>,
}

impl MiningContext<'_> {
    fn session_ids(&self, members: &[usize]) -> Vec<String> {
        let mut ids: Vec<String> = members
            .iter()
            .filter_map(|&i| self.sessions.get(i))
            .map(|s| s.id.clone())
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    fn cohesion(&self, members: &[usize]) -> f64 {
        let mut distances = Vec::new();
        for (x, &a) in members.iter().enumerate() {
            for &b in &members[x + 1..] {
                distances.push(euclidean(&self.rows[a], &self.rows[b]));
            }
        }
        1.0 / (1.0 + mean(&distances))
    }

    fn span_days(&self, first: usize, last: usize) -> f64 {
        (self.sessions[last].start_time - self.sessions[first].start_time).num_seconds() as f64
            / 86_400.0
    }

    fn persistence(&self, members: &[usize]) -> f64 {
        let total = self.span_days(0, self.sessions.len() - 1);
        if total <= 0.0 {
            return 1.0;
        }
        match (members.first(), members.last()) {
            (Some(&first), Some(&last)) => (self.span_days(first, last) / total).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// Mean step between consecutive members in feature space, mapped to [0, 1).
    fn evolution_rate(&self, members: &[usize]) -> f64 {
        let steps: Vec<f64> = members
            .windows(2)
            .map(|w| euclidean(&self.rows[w[0]], &self.rows[w[1]]))
            .collect();
        let m = mean(&steps);
        m / (1.0 + m)
    }

    fn clinical_magnitude(&self, members: &[usize]) -> f64 {
        if members.is_empty() {
            return 0.0;
        }
        let levels: Vec<Option<RiskLevel>> = members
            .iter()
            .map(|&i| self.sessions[i].risk_level())
            .collect();
        let critical = levels
            .iter()
            .filter(|l| matches!(l, Some(RiskLevel::Critical)))
            .count() as f64
            / members.len() as f64;
        let scores: Vec<f64> = levels
            .iter()
            .map(|l| l.map_or(RiskLevel::Low.score(), RiskLevel::score))
            .collect();
        (0.5 * critical + 0.5 * mean(&scores)).clamp(0.0, 1.0)
    }

    fn network_analysis(&self, members: &[usize]) -> NetworkAnalysis {
        let mut ranked: Vec<usize> = members.to_vec();
        ranked.sort_by(|&a, &b| {
            self.centrality[b]
                .total_cmp(&self.centrality[a])
                .then_with(|| self.sessions[a].id.cmp(&self.sessions[b].id))
        });
        NetworkAnalysis {
            central_session_ids: ranked
                .iter()
                .take(CENTRAL_SESSIONS)
                .map(|&i| self.sessions[i].id.clone())
                .collect(),
            connection_strength: self.network.connection_strength(members).clamp(0.0, 1.0),
            community_detected: has_community(&self.communities, members),
        }
    }

    fn temporal(&self, members: &[usize]) -> TemporalCharacteristics {
        let gaps: Vec<f64> = members
            .windows(2)
            .map(|w| self.span_days(w[0], w[1]))
            .collect();
        let mean_gap = mean(&gaps);
        let is_cyclic =
            gaps.len() >= 2 && mean_gap > 0.0 && coefficient_of_variation(&gaps) < CYCLIC_GAP_CV;
        let phase_shift = match members.first() {
            Some(&first) if is_cyclic => self.span_days(0, first) % mean_gap,
            _ => 0.0,
        };
        let durations: Vec<f64> = members
            .iter()
            .map(|&i| self.sessions[i].duration_minutes())
            .collect();
        TemporalCharacteristics {
            is_cyclic,
            period_days: is_cyclic.then_some(mean_gap),
            phase_shift,
            amplitude_variation: coefficient_of_variation(&durations),
        }
    }

    fn metrics(&self, members: &[usize]) -> AdvancedMetrics {
        AdvancedMetrics {
            cohesion_coefficient: self.cohesion(members),
            persistence_score: self.persistence(members),
            evolution_rate: self.evolution_rate(members),
            clinical_magnitude: self.clinical_magnitude(members),
            network: self.network_analysis(members),
        }
    }

    fn pattern(
        &self,
        pattern_type: &str,
        members: &[usize],
        description: String,
        confidence: f64,
    ) -> Option<CrossSessionPattern> {
        let session_ids = self.session_ids(members);
        if session_ids.is_empty() {
            return None;
        }
        let metrics = self.metrics(members);
        let impact = ImpactLevel::from_magnitude(metrics.clinical_magnitude);
        Some(CrossSessionPattern {
            id: deterministic_id(
                pattern_type,
                std::iter::once(description.as_str()).chain(session_ids.iter().map(String::as_str)),
            ),
            pattern_type: pattern_type.to_string(),
            frequency: members.len() as f64 / self.sessions.len() as f64,
            confidence: confidence.clamp(0.0, 1.0),
            recommendations: recommendations(pattern_type, impact),
            temporal: self.temporal(members),
            session_ids,
            description,
            impact,
            metrics,
        })
    }
}

fn recommendations(pattern_type: &str, impact: ImpactLevel) -> Vec<String> {
    let mut recs = match impact {
        ImpactLevel::High => vec![
            "Prioritise these sessions in the next case review".to_string(),
            "Reassess the safety plan with the client".to_string(),
        ],
        ImpactLevel::Medium => vec!["Track this pattern across upcoming sessions".to_string()],
        ImpactLevel::Low => vec!["No action needed beyond routine monitoring".to_string()],
    };
    match pattern_type {
        "co_occurrence" => {
            recs.push("Explore the link between the co-occurring themes with the client".to_string())
        }
        "temporal_sequence" => {
            recs.push("Anticipate the recurring sequence when planning sessions".to_string())
        }
        _ => {}
    }
    recs
}

/// Mine patterns that span several sessions. `sessions` must be ordered by
/// start time.
pub fn mine_cross_session_patterns(
    sessions: &[TherapySession],
    config: &MiningConfig,
) -> Result<Vec<CrossSessionPattern>, AnalysisError> {
    let n = sessions.len();
    if n < config.min_sessions {
        return Err(AnalysisError::insufficient(OPERATION, config.min_sessions, n));
    }

    let mut features = mining_features(sessions);
    features.validate()?;
    features.standardize();

    let network = SessionNetwork::build(&features.rows, config.edge_threshold);
    let ctx = MiningContext {
        sessions,
        centrality: network.centrality(),
        communities: network.communities(),
        network,
        rows: features.rows,
    };

    let k = cluster_count(n, config.max_clusters);
    let clustering = cluster_rows(&ctx.rows, k, config.min_cluster_size);
    tracing::debug!(
        sessions = n,
        k,
        clusters = clustering.clusters.len(),
        edges = ctx.network.edge_count(),
        "sessions clustered"
    );

    let mut patterns = Vec::new();
    for members in clustering
        .clusters
        .iter()
        .filter(|c| c.len() >= config.min_cluster_size) {
        let cohesion = ctx.cohesion(members);
        let frequency = members.len() as f64 / n as f64;
        let description = format!(
            "{} sessions share a similar profile (duration, emotional complexity, techniques, engagement, risk)",
            members.len()
        );
        patterns.extend(ctx.pattern(
            "session_cluster",
            members,
            description,
            0.5 * cohesion + 0.5 * frequency,
        ));
    }

    for itemset in mine_itemsets(sessions, config.min_support) {
        let (a, b) = &itemset.items;
        let (pattern_type, description) = match itemset.kind {
            ItemsetKind::CoOccurrence => (
                "co_occurrence",
                format!("'{a}' and '{b}' appear together in {:.0}% of sessions", itemset.support * 100.0),
            ),
            ItemsetKind::Transition => (
                "temporal_sequence",
                format!(
                    "'{a}' is followed by '{b}' in the next session ({:.0}% of consecutive pairs)",
                    itemset.support * 100.0
                ),
            ),
        };
        patterns.extend(ctx.pattern(pattern_type, &itemset.sessions, description, itemset.support));
    }

    Ok(patterns)
}
