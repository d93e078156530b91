use serde::{Deserialize, Serialize};

use super::pattern::PatternRecognitionResult;

/// Partitioned result of comparing two pattern sets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatternComparison {
    /// Merged pairs: union of session ids, averaged confidence.
    pub common: Vec<PatternRecognitionResult>,
    pub unique_a: Vec<PatternRecognitionResult>,
    pub unique_b: Vec<PatternRecognitionResult>,
}
