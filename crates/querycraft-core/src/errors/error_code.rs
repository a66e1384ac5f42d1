//! Stable error codes for structured logs and report consumers.

/// Every error enum exposes a stable code string alongside its message.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const PLAN_UNAVAILABLE: &str = "PLAN_UNAVAILABLE";
pub const PLAN_TIMEOUT: &str = "PLAN_TIMEOUT";
pub const CAPTURE_ERROR: &str = "CAPTURE_ERROR";
