//! Cross-session mining: clustering, session network, co-occurrences.

pub mod clustering;
pub mod miner;
pub mod network;
pub mod temporal;

pub use clustering::{cluster_count, cluster_rows, ClusterResult};
pub use miner::mine_cross_session_patterns;
pub use network::SessionNetwork;
pub use temporal::{mine_itemsets, ItemsetKind, ItemsetPattern};
