//! Beta posterior confidence for detector evidence.
//!
//! Prior: Beta(1, 1). Posterior: Beta(1 + k, 1 + n - k) where k is the
//! number of supporting observations out of n.

/// Beta-Binomial posterior over detector evidence.
pub struct BetaPosterior;

impl BetaPosterior {
    /// (alpha, beta) of the posterior. `successes` is capped at `total`.
    pub fn posterior_params(successes: usize, total: usize) -> (f64, f64) {
        let k = successes.min(total) as f64;
        let n = total as f64;
        (1.0 + k, 1.0 + (n - k))
    }

    /// alpha / (alpha + beta), clamped to [0, 1]; 0.5 on degenerate input.
    pub fn posterior_mean(alpha: f64, beta: f64) -> f64 {
        let sum = alpha + beta;
        if sum <= 0.0 || !sum.is_finite() {
            return 0.5;
        }
        let mean = alpha / sum;
        if mean.is_finite() {
            mean.clamp(0.0, 1.0)
        } else {
            0.5
        }
    }

    /// `(1 + k) / (2 + n)`.
    pub fn confidence(successes: usize, total: usize) -> f64 {
        let (alpha, beta) = Self::posterior_params(successes, total);
        Self::posterior_mean(alpha, beta)
    }
}
