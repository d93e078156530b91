//! Session similarity network.
//!
//! Nodes are sessions; an undirected edge joins two sessions whose
//! similarity `1 / (1 + distance)` reaches the edge threshold.

use cadence_core::types::collections::{BTreeMap, FxHashMap};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use super::clustering::euclidean;

const MAX_PROPAGATION_ROUNDS: usize = 20;

pub struct SessionNetwork {
    graph: UnGraph<usize, f64>,
    nodes: Vec<NodeIndex>,
}

impl SessionNetwork {
    /// Build the network over standardized feature rows.
    pub fn build(rows: &[Vec<f64>], edge_threshold: f64) -> Self {
        let mut graph = UnGraph::new_undirected();
        let nodes: Vec<NodeIndex> = (0..rows.len()).map(|i| graph.add_node(i)).collect();
        for i in 0..rows.len() {
            for j in (i + 1)..rows.len() {
                let similarity = 1.0 / (1.0 + euclidean(&rows[i], &rows[j]));
                if similarity >= edge_threshold {
                    graph.add_edge(nodes[i], nodes[j], similarity);
                }
            }
        }
        Self { graph, nodes }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Edge weight between two sessions; 0 when unconnected.
    pub fn weight(&self, a: usize, b: usize) -> f64 {
        match (self.nodes.get(a), self.nodes.get(b)) {
            (Some(&na), Some(&nb)) => self
                .graph
                .find_edge(na, nb)
                .and_then(|e| self.graph.edge_weight(e))
                .copied()
                .unwrap_or(0.0),
            _ => 0.0,
        }
    }

    fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        self.graph.edges(node).map(move |e| {
            let other = if e.source() == node { e.target() } else { e.source() };
            (other, *e.weight())
        })
    }

    /// Weighted degree divided by `n - 1`, per session.
    pub fn centrality(&self) -> Vec<f64> {
        let denom = self.nodes.len().saturating_sub(1).max(1) as f64;
        self.nodes
            .iter()
            .map(|&n| (self.neighbors(n).map(|(_, w)| w).sum::<f64>() / denom).min(1.0))
            .collect()
    }

    /// Weighted label propagation. Every session starts in its own
    /// community; ties go to the smallest label.
    pub fn communities(&self) -> Vec<usize> {
        let mut labels: Vec<usize> = (0..self.nodes.len()).collect();
        for _ in 0..MAX_PROPAGATION_ROUNDS {
            let mut changed = false;
            for (i, &node) in self.nodes.iter().enumerate() {
                let mut scores: BTreeMap<usize, f64> = BTreeMap::new();
                for (other, w) in self.neighbors(node) {
                    *scores.entry(labels[other.index()]).or_default() += w;
                }
                let best = scores
                    .into_iter()
                    .fold(None::<(usize, f64)>, |best, (label, score)| match best {
                        Some((_, s)) if s >= score => best,
                        _ => Some((label, score)),
                    });
                if let Some((label, _)) = best {
                    if label != labels[i] {
                        labels[i] = label;
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }
        labels
    }

    /// Mean edge weight over all member pairs (missing edges count 0).
    pub fn connection_strength(&self, members: &[usize]) -> f64 {
        if members.len() < 2 {
            return 0.0;
        }
        let mut total = 0.0;
        let mut pairs = 0usize;
        for (x, &a) in members.iter().enumerate() {
            for &b in &members[x + 1..] {
                total += self.weight(a, b);
                pairs += 1;
            }
        }
        total / pairs as f64
    }
}

/// True when some community holds at least two of `members`.
pub fn has_community(labels: &[usize], members: &[usize]) -> bool {
    let mut counts: FxHashMap<usize, usize> = FxHashMap::default();
    for &m in members {
        if let Some(&label) = labels.get(m) {
            let c = counts.entry(label).or_default();
            *c += 1;
            if *c >= 2 {
                return true;
            }
        }
    }
    false
}
