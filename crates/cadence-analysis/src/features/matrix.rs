//! Row-major feature matrix with named columns.

use cadence_core::errors::AnalysisError;

use crate::stats::{mean, std_dev};

/// One row per record, one named column per feature.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureMatrix {
    pub names: Vec<&'static str>,
    pub rows: Vec<Vec<f64>>,
    /// Id of the record each row was extracted from.
    pub record_ids: Vec<String>,
}

impl FeatureMatrix {
    pub fn new(names: &[&'static str]) -> Self {
        Self {
            names: names.to_vec(),
            rows: Vec::new(),
            record_ids: Vec::new(),
        }
    }

    pub fn push(&mut self, record_id: impl Into<String>, row: Vec<f64>) {
        self.record_ids.push(record_id.into());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.names.len()
    }

    /// Values of column `index`, one per row.
    pub fn column(&self, index: usize) -> Vec<f64> {
        self.rows
            .iter()
            .map(|row| row.get(index).copied().unwrap_or(0.0))
            .collect()
    }

    pub fn column_by_name(&self, name: &str) -> Option<Vec<f64>> {
        self.names
            .iter()
            .position(|n| *n == name)
            .map(|i| self.column(i))
    }

    pub fn columns(&self) -> Vec<Vec<f64>> {
        (0..self.width()).map(|i| self.column(i)).collect()
    }

    /// Reject ragged rows and non-finite values.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let width = self.width();
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != width {
                return Err(AnalysisError::invalid_input(format!(
                    "feature row {i} has {} values, expected {width}",
                    row.len()
                )));
            }
            if let Some(j) = row.iter().position(|v| !v.is_finite()) {
                return Err(AnalysisError::invalid_input(format!(
                    "feature row {i} column '{}' is not finite",
                    self.names[j]
                )));
            }
        }
        Ok(())
    }

    /// Z-score every column in place. Constant columns become all zeros.
    pub fn standardize(&mut self) {
        for j in 0..self.width() {
            let col = self.column(j);
            let m = mean(&col);
            let sd = std_dev(&col);
            for row in &mut self.rows {
                if let Some(v) = row.get_mut(j) {
                    *v = if sd > 0.0 { (*v - m) / sd } else { 0.0 };
                }
            }
        }
    }
}
