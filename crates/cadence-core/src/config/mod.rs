//! Configuration system for Cadence.
//! TOML-based, 3-layer resolution: env > project file > defaults.

pub mod analysis_config;
pub mod cadence_config;
pub mod correlation_config;
pub mod mining_config;
pub mod trend_config;

pub use analysis_config::AnalysisConfig;
pub use cadence_config::CadenceConfig;
pub use correlation_config::CorrelationConfig;
pub use mining_config::MiningConfig;
pub use trend_config::{ChangePointMethod, TrendConfig};
