//! Least-squares fits against the time index.

use super::descriptive::{mean, std_dev};
use super::EPSILON;

/// Ordinary least-squares fit of `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    /// Standard error of the slope; 0 when n < 3.
    pub slope_std_error: f64,
    pub n: usize,
}

/// Fit `values` against `0, 1, …, n-1`.
pub fn linear_regression(values: &[f64]) -> LinearFit {
    let x: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
    linear_regression_xy(&x, values)
}

/// Fit `y` against `x` (common prefix).
pub fn linear_regression_xy(x: &[f64], y: &[f64]) -> LinearFit {
    let n = x.len().min(y.len());
    if n < 2 {
        return LinearFit {
            slope: 0.0,
            intercept: y.first().copied().unwrap_or(0.0),
            r_squared: 0.0,
            slope_std_error: 0.0,
            n,
        };
    }
    let (x, y) = (&x[..n], &y[..n]);
    let mx = mean(x);
    let my = mean(y);

    let sxx: f64 = x.iter().map(|v| (v - mx).powi(2)).sum();
    let sxy: f64 = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum();
    let syy: f64 = y.iter().map(|v| (v - my).powi(2)).sum();

    if sxx < EPSILON {
        return LinearFit {
            slope: 0.0,
            intercept: my,
            r_squared: 0.0,
            slope_std_error: 0.0,
            n,
        };
    }

    let slope = sxy / sxx;
    let intercept = my - slope * mx;
    let ss_res: f64 = x
        .iter()
        .zip(y)
        .map(|(a, b)| (b - (slope * a + intercept)).powi(2))
        .sum();
    let r_squared = if syy < EPSILON {
        0.0
    } else {
        (1.0 - ss_res / syy).clamp(0.0, 1.0)
    };
    let slope_std_error = if n > 2 {
        (ss_res / (n - 2) as f64 / sxx).sqrt()
    } else {
        0.0
    };

    LinearFit {
        slope,
        intercept,
        r_squared,
        slope_std_error,
        n,
    }
}

/// Least-squares slope per step.
pub fn trend_slope(values: &[f64]) -> f64 {
    linear_regression(values).slope
}

/// Relative change over the observed span: `slope * (n - 1) / |mean|`.
///
/// Falls back to the standard deviation as the scale when the mean is 0,
/// and to 0 when the series is flat at 0.
pub fn normalized_slope(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let change = trend_slope(values) * (values.len() - 1) as f64;
    let level = mean(values).abs();
    let scale = if level >= EPSILON {
        level
    } else {
        std_dev(values)
    };
    if scale < EPSILON {
        return 0.0;
    }
    change / scale
}
