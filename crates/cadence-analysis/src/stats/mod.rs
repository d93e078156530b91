//! Statistical utilities shared by every analyzer.
//!
//! All functions are total: degenerate input (empty, constant, mismatched
//! lengths) yields a neutral value instead of NaN.

pub mod correlation;
pub mod descriptive;
pub mod outliers;
pub mod regression;
pub mod significance;

pub use correlation::{fisher_interval, kendall_tau, pearson, ranks, spearman};
pub use descriptive::{coefficient_of_variation, mean, moving_average, std_dev, variance};
pub use outliers::outlier_count;
pub use regression::{linear_regression, linear_regression_xy, normalized_slope, trend_slope, LinearFit};
pub use significance::{correlation_p_value, slope_p_value, two_tailed_p};

/// Values closer than this to zero are treated as zero.
pub(crate) const EPSILON: f64 = 1e-12;
