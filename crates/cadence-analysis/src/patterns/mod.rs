//! Pattern recognition: four detectors, one builder, validation and
//! cross-set comparison.

pub mod builder;
pub mod comparison;
pub mod confidence;
pub mod detectors;
pub mod trend;
pub mod validation;

pub use builder::build_pattern;
pub use comparison::{compare_pattern_sets, pattern_similarity};
pub use confidence::BetaPosterior;
pub use detectors::{DetectorFinding, Evidence, PatternDetector};
pub use trend::{detect_seasonality, determine_trend, TrendAssessment};
pub use validation::validate_patterns;
