//! The value handed to report consumers.

use serde::{Deserialize, Serialize};

use querycraft_core::types::Issue;

use crate::aggregation::IssueStatistics;
use crate::scoring::ScoreResult;

/// Outcome of one analysis. Same shape whichever detectors ran; a disabled
/// detector just contributes no issues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    pub query_count: usize,
    pub total_time_ms: f64,
    /// Critical first, detector order within a severity.
    pub issues: Vec<Issue>,
    pub score: ScoreResult,
    pub statistics: IssueStatistics,
}

impl DiagnosticsReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}
