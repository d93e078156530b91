//! Level-shift change points.

use cadence_core::config::{ChangePointMethod, TrendConfig};
use cadence_core::constants::CHANGE_POINT_CONFIDENCE;
use cadence_core::models::{ChangePoint, ChangeType, TimeSeriesPoint};

use crate::stats::{mean, std_dev, EPSILON};

/// CUSUM slack, in baseline standard deviations.
const CUSUM_K: f64 = 0.5;
/// CUSUM decision interval, in baseline standard deviations.
const CUSUM_H: f64 = 4.0;

/// Flag level shifts in `points` (ordered by time) using the configured method.
pub fn detect_change_points(points: &[TimeSeriesPoint], config: &TrendConfig) -> Vec<ChangePoint> {
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    let shifts = match config.change_point_method {
        ChangePointMethod::MeanShift => mean_shift(
            &values,
            config.change_point_window,
            config.change_point_threshold,
        ),
        ChangePointMethod::Cusum => cusum(
            &values,
            config.change_point_window,
            config.change_point_threshold,
        ),
    };

    shifts
        .into_iter()
        .filter_map(|(index, shift)| {
            points.get(index).map(|p| ChangePoint {
                timestamp: p.timestamp,
                index,
                confidence: CHANGE_POINT_CONFIDENCE,
                change_type: if shift > 0.0 {
                    ChangeType::LevelIncrease
                } else {
                    ChangeType::LevelDecrease
                },
            })
        })
        .collect()
}

/// Adjacent-window mean comparison. Returns `(index, shift)` with only the
/// largest shift kept from each run of consecutive flagged indices.
pub fn mean_shift(values: &[f64], window: usize, threshold: f64) -> Vec<(usize, f64)> {
    let n = values.len();
    if window == 0 || n < 2 * window {
        return Vec::new();
    }

    let mut result: Vec<(usize, f64)> = Vec::new();
    let mut run: Option<(usize, f64)> = None;
    let mut last_flagged: Option<usize> = None;

    for i in window..=(n - window) {
        let shift = mean(&values[i..i + window]) - mean(&values[i - window..i]);
        if shift.abs() <= threshold {
            continue;
        }
        let continues_run = last_flagged.is_some_and(|prev| prev + 1 == i);
        match run {
            Some((_, best)) if continues_run => {
                if shift.abs() > best.abs() {
                    run = Some((i, shift));
                }
            }
            _ => {
                if let Some(done) = run.take() {
                    result.push(done);
                }
                run = Some((i, shift));
            }
        }
        last_flagged = Some(i);
    }
    if let Some(done) = run {
        result.push(done);
    }
    result
}

/// Two-sided CUSUM over values standardized by the first `window` points.
/// Reports the start of each excursion whose level shift exceeds `threshold`,
/// then re-baselines on the excursion.
pub fn cusum(values: &[f64], window: usize, threshold: f64) -> Vec<(usize, f64)> {
    let n = values.len();
    if window == 0 || n < 2 * window {
        return Vec::new();
    }

    let mut baseline = mean(&values[..window]);
    let mut sd = std_dev(&values[..window]);
    if sd < EPSILON {
        sd = std_dev(values);
    }
    if sd < EPSILON {
        return Vec::new();
    }

    let mut result = Vec::new();
    let (mut high, mut low) = (0.0_f64, 0.0_f64);
    let (mut high_start, mut low_start) = (window, window);

    for i in window..n {
        let z = (values[i] - baseline) / sd;
        if high <= 0.0 {
            high_start = i;
        }
        if low <= 0.0 {
            low_start = i;
        }
        high = (high + z - CUSUM_K).max(0.0);
        low = (low - z - CUSUM_K).max(0.0);

        let start = if high > CUSUM_H {
            Some(high_start)
        } else if low > CUSUM_H {
            Some(low_start)
        } else {
            None
        };
        if let Some(start) = start {
            let new_level = mean(&values[start..=i]);
            let shift = new_level - baseline;
            if shift.abs() > threshold {
                result.push((start, shift));
            }
            baseline = new_level;
            high = 0.0;
            low = 0.0;
        }
    }
    result
}
