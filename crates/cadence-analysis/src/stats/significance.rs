//! Student-t significance tests via `statrs`.

use cadence_core::errors::AnalysisError;
use statrs::distribution::{ContinuousCDF, StudentsT};

use super::EPSILON;

/// Two-tailed p-value for a t statistic with `df` degrees of freedom.
pub fn two_tailed_p(t: f64, df: f64) -> Result<f64, AnalysisError> {
    if t.is_nan() || !df.is_finite() {
        return Err(AnalysisError::computation(
            "t-test",
            format!("invalid statistic t={t}, df={df}"),
        ));
    }
    if t.is_infinite() {
        return Ok(0.0);
    }
    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| AnalysisError::computation("t-test", e.to_string()))?;
    let p = 2.0 * (1.0 - dist.cdf(t.abs()));
    if !p.is_finite() {
        return Err(AnalysisError::computation(
            "t-test",
            format!("non-finite p-value for t={t}, df={df}"),
        ));
    }
    Ok(p.clamp(0.0, 1.0))
}

/// p-value for H0: ρ = 0 given a sample coefficient `r` over `n` pairs.
///
/// `t = r · √((n − 2) / (1 − r²))`, df = n − 2.
pub fn correlation_p_value(r: f64, n: usize) -> Result<f64, AnalysisError> {
    if n < 3 {
        return Err(AnalysisError::insufficient("correlation p-value", 3, n));
    }
    let r = r.clamp(-1.0, 1.0);
    let denom = 1.0 - r * r;
    if denom < EPSILON {
        return Ok(0.0);
    }
    let df = (n - 2) as f64;
    let t = r * (df / denom).sqrt();
    two_tailed_p(t, df)
}

/// p-value for a regression slope; 1.0 when there are too few points to test.
pub fn slope_p_value(slope: f64, std_error: f64, n: usize) -> Result<f64, AnalysisError> {
    if n < 3 {
        return Ok(1.0);
    }
    if std_error < EPSILON {
        return Ok(if slope.abs() < EPSILON { 1.0 } else { 0.0 });
    }
    two_tailed_p(slope / std_error, (n - 2) as f64)
}
