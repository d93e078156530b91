//! CadenceErrorCode trait for boundary consumers (dashboards, alerting).

/// Every error enum implements this to expose a stable, machine-readable code.
pub trait CadenceErrorCode {
    /// Returns the error code string (e.g., "INSUFFICIENT_DATA").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn boundary_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INSUFFICIENT_DATA: &str = "INSUFFICIENT_DATA";
pub const COMPUTATION_ERROR: &str = "COMPUTATION_ERROR";
pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const PROVIDER_UNAVAILABLE: &str = "PROVIDER_UNAVAILABLE";
pub const PROVIDER_NOT_FOUND: &str = "PROVIDER_NOT_FOUND";
pub const PROVIDER_TIMEOUT: &str = "PROVIDER_TIMEOUT";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
