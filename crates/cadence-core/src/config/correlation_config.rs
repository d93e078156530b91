use serde::{Deserialize, Serialize};

use crate::constants;

/// Correlation analyzer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// |r| below this is zeroed in the matrix.
    pub significance_threshold: f64,
    /// Below this many analyses a reliability warning is logged.
    pub reliable_sample_size: usize,
    /// Below this many analyses no correlation is computed at all.
    pub min_sample_size: usize,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            significance_threshold: constants::DEFAULT_SIGNIFICANCE_THRESHOLD,
            reliable_sample_size: constants::DEFAULT_RELIABLE_SAMPLE_SIZE,
            min_sample_size: constants::DEFAULT_MIN_CORRELATION_SAMPLES,
        }
    }
}
