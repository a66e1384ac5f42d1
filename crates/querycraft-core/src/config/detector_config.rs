//! Detector toggles.

use serde::{Deserialize, Serialize};

use crate::types::DetectorKind;

/// Which detectors run. Every detector defaults to enabled.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DetectorConfig {
    pub n1: Option<bool>,
    pub slow_query: Option<bool>,
    pub missing_index: Option<bool>,
    pub duplicate_query: Option<bool>,
}

impl DetectorConfig {
    /// Returns whether `kind` is enabled, defaulting to true.
    pub fn is_enabled(&self, kind: DetectorKind) -> bool {
        let flag = match kind {
            DetectorKind::N1 => self.n1,
            DetectorKind::SlowQuery => self.slow_query,
            DetectorKind::MissingIndex => self.missing_index,
            DetectorKind::DuplicateQuery => self.duplicate_query,
        };
        flag.unwrap_or(true)
    }
}
