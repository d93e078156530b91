//! Top-level Cadence configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, ChangePointMethod, CorrelationConfig, MiningConfig, TrendConfig};
use crate::constants::CONFIG_FILE_NAME;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`CADENCE_*`)
/// 2. Project config (`cadence.toml` in the given directory)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CadenceConfig {
    pub analysis: AnalysisConfig,
    pub correlation: CorrelationConfig,
    pub trends: TrendConfig,
    pub mining: MiningConfig,
}

impl CadenceConfig {
    /// Load configuration from `root/cadence.toml` (if present) plus the
    /// process environment, then validate.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(CONFIG_FILE_NAME);
        if project_config_path.exists() {
            let content = std::fs::read_to_string(&project_config_path).map_err(|_| {
                ConfigError::FileNotFound {
                    path: project_config_path.display().to_string(),
                }
            })?;
            config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: project_config_path.display().to_string(),
                message: e.to_string(),
            })?;
        }

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing and embedding).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &CadenceConfig) -> Result<(), ConfigError> {
        let unit_fields = [
            (
                "analysis.min_pattern_confidence",
                config.analysis.min_pattern_confidence,
            ),
            ("analysis.merge_similarity", config.analysis.merge_similarity),
            (
                "analysis.dominance_threshold",
                config.analysis.dominance_threshold,
            ),
            (
                "correlation.significance_threshold",
                Some(config.correlation.significance_threshold),
            ),
            ("mining.min_support", Some(config.mining.min_support)),
            ("mining.edge_threshold", Some(config.mining.edge_threshold)),
        ];
        for (field, value) in unit_fields {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be between 0.0 and 1.0".to_string(),
                    });
                }
            }
        }
        if let Some(threshold) = config.analysis.trend_slope_threshold {
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.trend_slope_threshold".to_string(),
                    message: "must be a non-negative number".to_string(),
                });
            }
        }
        let window_fields = [
            ("trends.moving_average_window", config.trends.moving_average_window),
            ("trends.seasonal_period", config.trends.seasonal_period),
            ("trends.change_point_window", config.trends.change_point_window),
            ("mining.max_clusters", config.mining.max_clusters),
        ];
        for (field, value) in window_fields {
            if value == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        let floor_fields = [
            ("mining.min_cluster_size", config.mining.min_cluster_size),
            ("mining.min_sessions", config.mining.min_sessions),
        ];
        for (field, value) in floor_fields {
            if value < 2 {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be at least 2".to_string(),
                });
            }
        }
        if config.correlation.min_sample_size < 3 {
            return Err(ConfigError::ValidationFailed {
                field: "correlation.min_sample_size".to_string(),
                message: "must be at least 3".to_string(),
            });
        }
        Ok(())
    }

    /// Apply `CADENCE_*` overrides from the process environment.
    pub fn apply_env_overrides(config: &mut CadenceConfig) {
        Self::apply_overrides_from(config, |key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    /// Unparseable values are ignored.
    pub fn apply_overrides_from(
        config: &mut CadenceConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) {
        if let Some(v) = parse_var::<f64>(&lookup, "CADENCE_MIN_PATTERN_CONFIDENCE") {
            config.analysis.min_pattern_confidence = Some(v);
        }
        if let Some(v) = parse_var::<f64>(&lookup, "CADENCE_MERGE_SIMILARITY") {
            config.analysis.merge_similarity = Some(v);
        }
        if let Some(v) = parse_var::<f64>(&lookup, "CADENCE_DOMINANCE_THRESHOLD") {
            config.analysis.dominance_threshold = Some(v);
        }
        if let Some(v) = parse_var::<f64>(&lookup, "CADENCE_SIGNIFICANCE_THRESHOLD") {
            config.correlation.significance_threshold = v;
        }
        if let Some(v) = parse_var::<f64>(&lookup, "CADENCE_CHANGE_POINT_THRESHOLD") {
            config.trends.change_point_threshold = v;
        }
        if let Some(val) = lookup("CADENCE_CHANGE_POINT_METHOD") {
            match val.to_ascii_lowercase().as_str() {
                "mean_shift" => config.trends.change_point_method = ChangePointMethod::MeanShift,
                "cusum" => config.trends.change_point_method = ChangePointMethod::Cusum,
                _ => {}
            }
        }
        if let Some(v) = parse_var::<usize>(&lookup, "CADENCE_MAX_CLUSTERS") {
            config.mining.max_clusters = v;
        }
        if let Some(v) = parse_var::<f64>(&lookup, "CADENCE_MIN_SUPPORT") {
            config.mining.min_support = v;
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    lookup(key).and_then(|val| val.trim().parse::<T>().ok())
}
