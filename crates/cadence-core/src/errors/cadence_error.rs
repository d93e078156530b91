//! Umbrella error aggregating subsystem errors via `From` conversions.

use super::error_code::CadenceErrorCode;
use super::{AnalysisError, ConfigError, ProviderError};

#[derive(Debug, thiserror::Error)]
pub enum CadenceError {
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CadenceErrorCode for CadenceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Analysis(e) => e.error_code(),
            Self::Provider(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

pub type CadenceResult<T> = Result<T, CadenceError>;
