use serde::{Deserialize, Serialize};

use crate::constants;

/// Cross-session mining configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Hard cap on clusters; the effective cap is `min(max_clusters, ceil(n / 3))`.
    pub max_clusters: usize,
    /// Minimum support (fraction of sessions) for co-occurrence patterns.
    pub min_support: f64,
    /// Minimum similarity for an edge in the session network.
    pub edge_threshold: f64,
    /// HDBSCAN minimum cluster size, also the smallest reported cluster.
    pub min_cluster_size: usize,
    pub min_sessions: usize,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            max_clusters: constants::DEFAULT_MAX_CLUSTERS,
            min_support: constants::DEFAULT_MIN_SUPPORT,
            edge_threshold: constants::DEFAULT_EDGE_THRESHOLD,
            min_cluster_size: constants::DEFAULT_MIN_CLUSTER_SIZE,
            min_sessions: constants::DEFAULT_MIN_MINING_SESSIONS,
        }
    }
}
