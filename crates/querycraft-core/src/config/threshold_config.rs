//! Detector thresholds.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DUPLICATE_COUNT, DEFAULT_N1_COUNT, DEFAULT_SLOW_QUERY_MS};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Minimum repetitions of one query shape. Default: 5.
    pub n1_count: Option<u32>,
    /// Slow query cutoff in milliseconds. Default: 100.
    pub slow_query_ms: Option<f64>,
    /// Minimum identical executions. Default: 2.
    pub duplicate_count: Option<u32>,
}

impl ThresholdConfig {
    pub fn effective_n1_count(&self) -> u32 {
        self.n1_count.unwrap_or(DEFAULT_N1_COUNT)
    }

    pub fn effective_slow_query_ms(&self) -> f64 {
        self.slow_query_ms.unwrap_or(DEFAULT_SLOW_QUERY_MS)
    }

    pub fn effective_duplicate_count(&self) -> u32 {
        self.duplicate_count.unwrap_or(DEFAULT_DUPLICATE_COUNT)
    }
}
