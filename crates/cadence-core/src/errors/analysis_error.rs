//! Analysis errors.
//!
//! None of these are fatal. Entry points log them and hand them back inside
//! `AnalysisOutcome::Degraded` next to an empty or fallback value.

use super::error_code::{self, CadenceErrorCode};
use super::ProviderError;

/// Errors that can occur inside the analytic core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("{operation}: insufficient data (need {required}, got {actual})")]
    InsufficientData {
        operation: String,
        required: usize,
        actual: usize,
    },

    #[error("{operation}: computation failed: {message}")]
    Computation { operation: String, message: String },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("data unavailable: {0}")]
    DataUnavailable(#[from] ProviderError),
}

impl AnalysisError {
    pub fn insufficient(operation: impl Into<String>, required: usize, actual: usize) -> Self {
        Self::InsufficientData {
            operation: operation.into(),
            required,
            actual,
        }
    }

    pub fn computation(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Computation {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl CadenceErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => error_code::INSUFFICIENT_DATA,
            Self::Computation { .. } => error_code::COMPUTATION_ERROR,
            Self::InvalidInput { .. } => error_code::INVALID_INPUT,
            Self::DataUnavailable(e) => e.error_code(),
        }
    }
}
