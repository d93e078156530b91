//! Pearson, Spearman, and Kendall coefficients, plus Fisher-z intervals.

use super::descriptive::mean;
use super::EPSILON;

/// Pearson product-moment correlation, clamped to [-1, 1].
///
/// Uses the common prefix when lengths differ. Returns 0.0 when either
/// series is constant or fewer than two pairs exist.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);
    let mx = mean(x);
    let my = mean(y);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom < EPSILON || !denom.is_finite() {
        return 0.0;
    }
    (cov / denom).clamp(-1.0, 1.0)
}

/// 1-based ranks; ties share the average of the ranks they span.
pub fn ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut result = vec![0.0; values.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        let avg_rank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            result[idx] = avg_rank;
        }
        i = j + 1;
    }
    result
}

/// Spearman rank correlation: Pearson over average ranks.
pub fn spearman(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    pearson(&ranks(&x[..n]), &ranks(&y[..n]))
}

/// Kendall tau-b (tie-corrected).
pub fn kendall_tau(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }

    let mut concordant = 0i64;
    let mut discordant = 0i64;
    let mut ties_x = 0i64;
    let mut ties_y = 0i64;

    for i in 0..n {
        for j in (i + 1)..n {
            let dx = (x[i] - x[j]).signum_or_zero();
            let dy = (y[i] - y[j]).signum_or_zero();
            if dx == 0.0 {
                ties_x += 1;
            }
            if dy == 0.0 {
                ties_y += 1;
            }
            if dx != 0.0 && dy != 0.0 {
                if dx == dy {
                    concordant += 1;
                } else {
                    discordant += 1;
                }
            }
        }
    }

    let pairs = (n * (n - 1) / 2) as i64;
    let denom = (((pairs - ties_x) * (pairs - ties_y)) as f64).sqrt();
    if denom < EPSILON {
        return 0.0;
    }
    ((concordant - discordant) as f64 / denom).clamp(-1.0, 1.0)
}

/// 95% confidence interval for a Pearson coefficient via Fisher's z.
/// Needs n > 3; otherwise the uninformative interval (-1, 1).
pub fn fisher_interval(r: f64, n: usize) -> (f64, f64) {
    if n <= 3 || !r.is_finite() {
        return (-1.0, 1.0);
    }
    let r = r.clamp(-0.999_999, 0.999_999);
    let z = r.atanh();
    let se = 1.0 / ((n - 3) as f64).sqrt();
    let low = (z - 1.96 * se).tanh();
    let high = (z + 1.96 * se).tanh();
    (low.clamp(-1.0, 1.0), high.clamp(-1.0, 1.0))
}

trait SignumOrZero {
    fn signum_or_zero(self) -> f64;
}

impl SignumOrZero for f64 {
    fn signum_or_zero(self) -> f64 {
        if self.abs() < EPSILON {
            0.0
        } else {
            self.signum()
        }
    }
}
