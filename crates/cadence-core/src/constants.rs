//! Shared constants and compiled defaults for the Cadence engine.

/// Cadence version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum records any pattern detector needs.
pub const DEFAULT_MIN_RECORDS: usize = 2;

/// Minimum confidence (and mean confidence) a pattern needs to survive validation.
pub const DEFAULT_MIN_PATTERN_CONFIDENCE: f64 = 0.6;

/// Similarity at which two patterns from different sets are merged.
pub const DEFAULT_MERGE_SIMILARITY: f64 = 0.8;

/// Share of technique mentions one technique needs to be dominant.
pub const DEFAULT_DOMINANCE_THRESHOLD: f64 = 0.60;

/// Normalized slope beyond which a series is increasing/decreasing.
pub const DEFAULT_TREND_SLOPE_THRESHOLD: f64 = 0.1;

/// Points needed before seasonality is reported on a pattern timeline.
pub const DEFAULT_SEASONALITY_MIN_POINTS: usize = 12;

/// Conservative confidence attached to timeline seasonality.
pub const TIMELINE_SEASONALITY_CONFIDENCE: f64 = 0.3;

/// |r| below which a correlation is zeroed.
pub const DEFAULT_SIGNIFICANCE_THRESHOLD: f64 = 0.3;

/// Emotion analyses needed for reliable correlations.
pub const DEFAULT_RELIABLE_SAMPLE_SIZE: usize = 10;

/// Absolute floor for computing any correlation.
pub const DEFAULT_MIN_CORRELATION_SAMPLES: usize = 3;

/// Moving-average window for trend decomposition.
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 7;

/// Period of the fitted seasonal component.
pub const DEFAULT_SEASONAL_PERIOD: usize = 7;

/// Half-window used by the mean-shift change-point detector.
pub const DEFAULT_CHANGE_POINT_WINDOW: usize = 5;

/// Mean difference that flags a change point.
pub const DEFAULT_CHANGE_POINT_THRESHOLD: f64 = 0.3;

/// Fixed confidence attached to mean-shift change points.
pub const CHANGE_POINT_CONFIDENCE: f64 = 0.8;

/// Upper bound on cross-session clusters.
pub const DEFAULT_MAX_CLUSTERS: usize = 5;

/// Minimum support for co-occurrence mining.
pub const DEFAULT_MIN_SUPPORT: f64 = 0.3;

/// Minimum similarity for an edge in the session network.
pub const DEFAULT_EDGE_THRESHOLD: f64 = 0.5;

/// HDBSCAN minimum cluster size; smaller clusters yield no pattern.
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 2;

/// Sessions cross-session mining needs.
pub const DEFAULT_MIN_MINING_SESSIONS: usize = 2;

/// Default tracing filter when `CADENCE_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "cadence=info";

/// Name of the project-level configuration file.
pub const CONFIG_FILE_NAME: &str = "cadence.toml";
