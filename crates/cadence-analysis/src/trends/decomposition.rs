//! Additive decomposition: moving-average trend plus a single harmonic.

use std::f64::consts::TAU;

use cadence_core::models::SeasonalDecomposition;

use crate::stats::{moving_average, variance, EPSILON};

/// Split `values` into trend, seasonal, and residual components.
///
/// Needs at least two full periods; returns `None` otherwise.
pub fn decompose(values: &[f64], period: usize, window: usize) -> Option<SeasonalDecomposition> {
    if period == 0 || values.len() < 2 * period {
        return None;
    }

    let trend = moving_average(values, window);
    let detrended: Vec<f64> = values.iter().zip(&trend).map(|(v, t)| v - t).collect();

    // Least squares for a·sin(ωt) + b·cos(ωt).
    let omega = TAU / period as f64;
    let (mut ss, mut cc, mut sc, mut sd, mut cd) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for (t, d) in detrended.iter().enumerate() {
        let (s, c) = (omega * t as f64).sin_cos();
        ss += s * s;
        cc += c * c;
        sc += s * c;
        sd += s * d;
        cd += c * d;
    }
    let det = ss * cc - sc * sc;
    let (a, b) = if det.abs() < EPSILON {
        (0.0, 0.0)
    } else {
        ((sd * cc - cd * sc) / det, (cd * ss - sd * sc) / det)
    };

    let seasonal: Vec<f64> = (0..values.len())
        .map(|t| {
            let (s, c) = (omega * t as f64).sin_cos();
            a * s + b * c
        })
        .collect();
    let residual: Vec<f64> = detrended
        .iter()
        .zip(&seasonal)
        .map(|(d, s)| d - s)
        .collect();

    // seasonal + residual is the detrended series
    let total = variance(&detrended);
    let seasonality_strength = if total < EPSILON {
        0.0
    } else {
        (1.0 - variance(&residual) / total).clamp(0.0, 1.0)
    };

    Some(SeasonalDecomposition {
        trend,
        seasonal,
        residual,
        seasonality_strength,
    })
}
