//! Risk-factor correlation analysis over emotion analyses.

pub mod analyzer;
pub mod matrix;

pub use analyzer::{analyze_correlations, fallback_correlation, FALLBACK_FACTOR};
pub use matrix::CorrelationMatrix;
