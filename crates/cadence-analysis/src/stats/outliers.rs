//! Z-Score outlier counting with iterative masking.
//!
//! Masking keeps one extreme value from hiding others by inflating the
//! standard deviation.

use super::descriptive::mean;

/// Default |z| threshold. Session series are short, so this is lower than
/// the 2.5 usually used on large samples.
pub const DEFAULT_Z_THRESHOLD: f64 = 2.0;

/// Maximum masking iterations.
pub const MAX_MASKING_ITERATIONS: usize = 3;

/// Indices whose |z| exceeds `threshold`, found over up to `max_iterations`
/// masking rounds.
pub fn zscore_outliers(values: &[f64], threshold: f64, max_iterations: usize) -> Vec<usize> {
    if values.len() < 3 {
        return Vec::new();
    }

    let mut masked = vec![false; values.len()];
    let mut outliers = Vec::new();

    for _ in 0..max_iterations {
        let active: Vec<(usize, f64)> = values
            .iter()
            .enumerate()
            .filter(|(i, _)| !masked[*i])
            .map(|(i, &v)| (i, v))
            .collect();
        if active.len() < 3 {
            break;
        }

        let active_values: Vec<f64> = active.iter().map(|(_, v)| *v).collect();
        let m = mean(&active_values);
        let n = active_values.len() as f64;
        let var = active_values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1.0);
        if !var.is_finite() || var <= 0.0 {
            break;
        }
        let sd = var.sqrt();

        let mut found_new = false;
        for &(idx, val) in &active {
            if ((val - m) / sd).abs() > threshold {
                masked[idx] = true;
                outliers.push(idx);
                found_new = true;
            }
        }
        if !found_new {
            break;
        }
    }

    outliers.sort_unstable();
    outliers
}

/// Number of outliers at the default threshold.
pub fn outlier_count(values: &[f64]) -> usize {
    zscore_outliers(values, DEFAULT_Z_THRESHOLD, MAX_MASKING_ITERATIONS).len()
}
