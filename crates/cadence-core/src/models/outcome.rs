//! Success-versus-degraded wrapper returned by every analysis entry point.

use serde::Serialize;

use crate::errors::AnalysisError;

/// Outcome of an analysis entry point.
///
/// Failures are never fatal: a degraded outcome still carries a usable value
/// (empty, or a documented fallback) together with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AnalysisOutcome<T> {
    Complete(T),
    Degraded {
        value: T,
        #[serde(serialize_with = "serialize_reason")]
        reason: AnalysisError,
    },
}

impl<T> AnalysisOutcome<T> {
    pub fn degraded(value: T, reason: AnalysisError) -> Self {
        Self::Degraded { value, reason }
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Complete(value) | Self::Degraded { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Complete(value) | Self::Degraded { value, .. } => value,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    pub fn reason(&self) -> Option<&AnalysisError> {
        match self {
            Self::Complete(_) => None,
            Self::Degraded { reason, .. } => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AnalysisOutcome<U> {
        match self {
            Self::Complete(value) => AnalysisOutcome::Complete(f(value)),
            Self::Degraded { value, reason } => AnalysisOutcome::Degraded {
                value: f(value),
                reason,
            },
        }
    }
}

impl<T: Default> AnalysisOutcome<T> {
    /// Degraded outcome carrying `T::default()` (an empty list for `Vec`).
    pub fn empty(reason: AnalysisError) -> Self {
        Self::Degraded {
            value: T::default(),
            reason,
        }
    }
}

fn serialize_reason<S: serde::Serializer>(
    reason: &AnalysisError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&reason.to_string())
}
