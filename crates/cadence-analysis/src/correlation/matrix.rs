//! Symmetric Pearson correlation matrix over feature columns.

use crate::features::FeatureMatrix;
use crate::stats::pearson;

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub names: Vec<&'static str>,
    /// Row-major, `names.len()` square.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Pairwise Pearson coefficients. The diagonal is fixed at 1 and the
    /// lower triangle mirrors the upper one.
    pub fn build(features: &FeatureMatrix) -> Self {
        let columns = features.columns();
        let k = columns.len();
        let mut values = vec![vec![0.0; k]; k];
        for i in 0..k {
            values[i][i] = 1.0;
            for j in (i + 1)..k {
                let r = pearson(&columns[i], &columns[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }
        Self {
            names: features.names.clone(),
            values,
        }
    }

    pub fn size(&self) -> usize {
        self.names.len()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values
            .get(i)
            .and_then(|row| row.get(j))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        let k = self.size();
        (0..k).all(|i| (0..k).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tolerance))
    }

    /// Zero every off-diagonal entry with |r| below `threshold`.
    pub fn apply_significance(mut self, threshold: f64) -> Self {
        let k = self.size();
        for i in 0..k {
            for j in 0..k {
                if i != j && self.values[i][j].abs() < threshold {
                    self.values[i][j] = 0.0;
                }
            }
        }
        self
    }
}
