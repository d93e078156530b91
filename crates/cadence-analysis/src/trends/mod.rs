//! Long-term trend analysis: regression, seasonal decomposition, change points.

pub mod analyzer;
pub mod change_points;
pub mod decomposition;

pub use analyzer::analyze_series;
pub use change_points::detect_change_points;
pub use decomposition::decompose;
