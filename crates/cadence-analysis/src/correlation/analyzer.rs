//! Builds `RiskCorrelation` records from the emotion feature matrix.

use cadence_core::config::CorrelationConfig;
use cadence_core::errors::AnalysisError;
use cadence_core::models::{
    CorrelatedFactor, CorrelationMetrics, EffectSize, EmotionAnalysis, RiskCorrelation, Severity,
    TimeFrame,
};

use super::matrix::CorrelationMatrix;
use crate::features::emotion_features;
use crate::stats::{correlation_p_value, fisher_interval, kendall_tau, spearman};

/// Primary factor of the fallback record returned when computation fails.
pub const FALLBACK_FACTOR: &str = "correlation_unavailable";

const OPERATION: &str = "risk factor correlation";

fn severity_for(max_abs: f64) -> Severity {
    if max_abs > 0.8 {
        Severity::Critical
    } else if max_abs > 0.7 {
        Severity::High
    } else if max_abs > 0.5 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

fn time_frame(analyses: &[EmotionAnalysis]) -> TimeFrame {
    let start = analyses.iter().map(|a| a.timestamp).min().unwrap_or_default();
    let end = analyses.iter().map(|a| a.timestamp).max().unwrap_or_default();
    TimeFrame {
        start,
        end,
        duration_days: (end - start).num_seconds() as f64 / 86_400.0,
    }
}

fn recommendations(severity: Severity, primary: &str, sample_size: usize, reliable: usize) -> Vec<String> {
    let mut recs = match severity {
        Severity::Critical => vec![
            format!("Immediate clinical review: '{primary}' is strongly coupled with other risk factors"),
            "Increase monitoring frequency until the coupling weakens".to_string(),
        ],
        Severity::High => vec![format!(
            "Schedule a focused review of factors correlated with '{primary}'"
        )],
        Severity::Medium => vec![format!("Monitor '{primary}' and its correlates in upcoming sessions")],
        Severity::Low => vec!["Continue routine monitoring".to_string()],
    };
    if sample_size < reliable {
        recs.push(format!(
            "Collect at least {reliable} emotion analyses before acting on these correlations"
        ));
    }
    recs
}

/// Correlations between every pair of emotion features.
///
/// One record per factor that has at least one significant correlate,
/// ordered by severity (highest first) then factor name.
pub fn analyze_correlations(
    analyses: &[EmotionAnalysis],
    config: &CorrelationConfig,
) -> Result<Vec<RiskCorrelation>, AnalysisError> {
    let n = analyses.len();
    if n < config.min_sample_size {
        return Err(AnalysisError::insufficient(OPERATION, config.min_sample_size, n));
    }
    if n < config.reliable_sample_size {
        tracing::warn!(
            sample_size = n,
            reliable = config.reliable_sample_size,
            "correlation results may be unreliable"
        );
    }

    let features = emotion_features(analyses);
    features.validate()?;
    let raw = CorrelationMatrix::build(&features);
    let significant = raw.clone().apply_significance(config.significance_threshold);
    let columns = features.columns();
    let frame = time_frame(analyses);

    let mut results = Vec::new();
    for i in 0..significant.size() {
        let mut factors = Vec::new();
        for j in (0..significant.size()).filter(|&j| j != i) {
            let r = significant.get(i, j);
            if r == 0.0 {
                continue;
            }
            let p_value = correlation_p_value(r, n)?;
            factors.push((
                j,
                CorrelatedFactor {
                    factor: significant.names[j].to_string(),
                    coefficient: r,
                    confidence: (1.0 - p_value).clamp(0.0, 1.0),
                    p_value,
                    effect_size: EffectSize::from_coefficient(r),
                },
            ));
        }
        if factors.is_empty() {
            continue;
        }
        factors.sort_by(|a, b| {
            b.1.coefficient
                .abs()
                .total_cmp(&a.1.coefficient.abs())
                .then_with(|| a.1.factor.cmp(&b.1.factor))
        });

        let strongest = factors[0].0;
        let r = raw.get(i, strongest);
        let metrics = CorrelationMetrics {
            sample_size: n,
            pearson: r,
            spearman: spearman(&columns[i], &columns[strongest]),
            kendall: kendall_tau(&columns[i], &columns[strongest]),
            confidence_interval: fisher_interval(r, n),
        };

        let max_abs = r.abs();
        let severity = severity_for(max_abs);
        let primary = significant.names[i];
        results.push(RiskCorrelation {
            primary_factor: primary.to_string(),
            correlated_factors: factors.into_iter().map(|(_, f)| f).collect(),
            time_frame: frame.clone(),
            severity,
            action_required: max_abs > 0.7,
            recommendations: recommendations(severity, primary, n, config.reliable_sample_size),
            metrics,
        });
    }

    results.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.primary_factor.cmp(&b.primary_factor))
    });
    tracing::debug!(factors = results.len(), sample_size = n, "correlations computed");
    Ok(results)
}

/// Documented fallback for a failed correlation computation.
pub fn fallback_correlation(analyses: &[EmotionAnalysis]) -> RiskCorrelation {
    RiskCorrelation {
        primary_factor: FALLBACK_FACTOR.to_string(),
        correlated_factors: Vec::new(),
        time_frame: time_frame(analyses),
        severity: Severity::Low,
        action_required: false,
        recommendations: vec!["Correlation analysis unavailable; review the input data".to_string()],
        metrics: CorrelationMetrics {
            sample_size: analyses.len(),
            pearson: 0.0,
            spearman: 0.0,
            kendall: 0.0,
            confidence_interval: (-1.0, 1.0),
        },
    }
}
