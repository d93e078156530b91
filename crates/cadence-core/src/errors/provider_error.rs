//! Errors surfaced by external data providers.

use super::error_code::{self, CadenceErrorCode};

/// Errors returned by session, emotion, and time-series providers.
/// Retries and backoff are the provider's concern; the core only records these.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("provider {provider} unavailable: {message}")]
    Unavailable { provider: String, message: String },

    #[error("no data for client {client_id}")]
    NotFound { client_id: String },

    #[error("provider timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

impl CadenceErrorCode for ProviderError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => error_code::PROVIDER_UNAVAILABLE,
            Self::NotFound { .. } => error_code::PROVIDER_NOT_FOUND,
            Self::Timeout { .. } => error_code::PROVIDER_TIMEOUT,
        }
    }
}
