//! Score weights.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_WEIGHT_ISSUES, DEFAULT_WEIGHT_QUERY_COUNT, DEFAULT_WEIGHT_QUERY_TIME,
};

/// Per-dimension score weights. Documented to total 100.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WeightConfig {
    /// Default: 40.
    pub query_count: Option<u32>,
    /// Default: 30.
    pub query_time: Option<u32>,
    /// Default: 30.
    pub issues: Option<u32>,
}

impl WeightConfig {
    pub fn effective_query_count(&self) -> u32 {
        self.query_count.unwrap_or(DEFAULT_WEIGHT_QUERY_COUNT)
    }

    pub fn effective_query_time(&self) -> u32 {
        self.query_time.unwrap_or(DEFAULT_WEIGHT_QUERY_TIME)
    }

    pub fn effective_issues(&self) -> u32 {
        self.issues.unwrap_or(DEFAULT_WEIGHT_ISSUES)
    }
}
