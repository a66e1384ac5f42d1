//! Capture session errors.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Capture session already stopped; {dropped_sql} was not recorded")]
    SessionClosed { dropped_sql: String },
}

impl ErrorCode for CaptureError {
    fn error_code(&self) -> &'static str {
        error_code::CAPTURE_ERROR
    }
}
