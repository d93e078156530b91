//! Session clustering: HDBSCAN on standardized session features, then
//! nearest-centroid merging down to the cluster cap.
//!
//! Noise points start as singleton groups, so every session ends up in
//! exactly one cluster. Identical input always yields identical clusters.

use hdbscan::{Hdbscan, HdbscanHyperParams};

use crate::stats::EPSILON;

/// Result of clustering: member indices per non-empty cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterResult {
    /// Each inner Vec holds indices into the input rows, ascending.
    /// Clusters are ordered by their smallest member.
    pub clusters: Vec<Vec<usize>>,
    /// Cluster label per input row.
    pub assignments: Vec<usize>,
}

/// `min(max_clusters, ceil(n / 3))`, at least 1.
pub fn cluster_count(n: usize, max_clusters: usize) -> usize {
    max_clusters.min(n.div_ceil(3)).max(1)
}

pub(crate) fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

fn centroid(rows: &[Vec<f64>], members: &[usize]) -> Vec<f64> {
    let width = rows[members[0]].len();
    (0..width)
        .map(|j| members.iter().map(|&i| rows[i][j]).sum::<f64>() / members.len() as f64)
        .collect()
}

/// HDBSCAN labels grouped per cluster, noise as singletons.
fn density_groups(rows: &[Vec<f64>], min_cluster_size: usize) -> Vec<Vec<usize>> {
    let singletons = || (0..rows.len()).map(|i| vec![i]).collect::<Vec<_>>();
    if rows.len() < min_cluster_size {
        return singletons();
    }

    let hyper_params = HdbscanHyperParams::builder()
        .min_cluster_size(min_cluster_size)
        .min_samples(1)
        .build();
    let data = rows.to_vec();
    let labels = match Hdbscan::new(&data, hyper_params).cluster() {
        Ok(labels) => labels,
        Err(err) => {
            tracing::warn!(error = ?err, rows = rows.len(), "hdbscan failed, merging from singletons");
            return singletons();
        }
    };

    let mut labelled: Vec<(i32, usize)> = labels.iter().copied().zip(0..).collect();
    labelled.sort_unstable();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut current = None;
    for (label, i) in labelled {
        if label < 0 {
            groups.push(vec![i]);
        } else if current == Some(label) {
            if let Some(group) = groups.last_mut() {
                group.push(i);
            }
        } else {
            current = Some(label);
            groups.push(vec![i]);
        }
    }
    groups
}

/// Cluster `rows` into at most `k` groups.
///
/// Groups are merged pairwise by nearest centroid until at most `k` remain;
/// groups with coincident centroids are always merged.
pub fn cluster_rows(rows: &[Vec<f64>], k: usize, min_cluster_size: usize) -> ClusterResult {
    if rows.is_empty() || k == 0 {
        return ClusterResult {
            clusters: Vec::new(),
            assignments: Vec::new(),
        };
    }

    let mut clusters = density_groups(rows, min_cluster_size.max(2));
    let density_clusters = clusters.len();
    while clusters.len() > 1 {
        let centroids: Vec<Vec<f64>> = clusters.iter().map(|c| centroid(rows, c)).collect();
        let mut best = (0, 1, f64::INFINITY);
        for a in 0..centroids.len() {
            for b in a + 1..centroids.len() {
                let d = euclidean(&centroids[a], &centroids[b]);
                if d < best.2 {
                    best = (a, b, d);
                }
            }
        }
        let (a, b, d) = best;
        if clusters.len() <= k && d > EPSILON {
            break;
        }
        let absorbed = clusters.remove(b);
        clusters[a].extend(absorbed);
    }

    for members in &mut clusters {
        members.sort_unstable();
    }
    clusters.sort_by_key(|c| c[0]);

    let mut assignments = vec![0; rows.len()];
    for (label, members) in clusters.iter().enumerate() {
        for &i in members {
            assignments[i] = label;
        }
    }
    tracing::trace!(density_clusters, merged = clusters.len(), k, "clusters merged to cap");

    ClusterResult {
        clusters,
        assignments,
    }
}
