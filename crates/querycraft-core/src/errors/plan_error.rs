//! Query planner errors. Always per query, never fatal to a batch.

use super::error_code::{self, ErrorCode};

/// Errors a query planner may return for a single statement.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("Plan unavailable: {reason}")]
    PlanUnavailable { reason: String },

    #[error("Statement cannot be explained: {statement}")]
    NotExplainable { statement: String },

    #[error("Planner timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

impl ErrorCode for PlanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::PlanUnavailable { .. } | Self::NotExplainable { .. } => {
                error_code::PLAN_UNAVAILABLE
            }
            Self::Timeout { .. } => error_code::PLAN_TIMEOUT,
        }
    }
}
