//! Resolved configuration handed to one analysis run.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DEPENDENCY_DIR, DEFAULT_DUPLICATE_COUNT, DEFAULT_N1_COUNT, DEFAULT_SKIP_PATHS,
    DEFAULT_SLOW_QUERY_MS, DEFAULT_WEIGHT_ISSUES, DEFAULT_WEIGHT_QUERY_COUNT,
    DEFAULT_WEIGHT_QUERY_TIME,
};
use crate::types::DetectorKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub n1_count: u32,
    pub slow_query_ms: f64,
    pub duplicate_count: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            n1_count: DEFAULT_N1_COUNT,
            slow_query_ms: DEFAULT_SLOW_QUERY_MS,
            duplicate_count: DEFAULT_DUPLICATE_COUNT,
        }
    }
}

/// Score weights, applied literally: `Σ sub_score × weight / 100`.
/// Nothing here enforces a total of 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub query_count: u32,
    pub query_time: u32,
    pub issues: u32,
}

impl ScoreWeights {
    pub fn total(&self) -> u32 {
        self.query_count + self.query_time + self.issues
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            query_count: DEFAULT_WEIGHT_QUERY_COUNT,
            query_time: DEFAULT_WEIGHT_QUERY_TIME,
            issues: DEFAULT_WEIGHT_ISSUES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSettings {
    /// Prefix stripped from reported paths. Empty means "no project root".
    pub project_root: String,
    /// A frame whose path contains any of these is not application code.
    pub skip_paths: Vec<String>,
    /// Installed-dependency directory, excluded by the fallback pass.
    pub dependency_dir: String,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            project_root: String::new(),
            skip_paths: DEFAULT_SKIP_PATHS.iter().map(|s| s.to_string()).collect(),
            dependency_dir: DEFAULT_DEPENDENCY_DIR.to_string(),
        }
    }
}

/// Immutable per-run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    pub enabled_detectors: BTreeSet<DetectorKind>,
    pub thresholds: Thresholds,
    pub weights: ScoreWeights,
    pub location: LocationSettings,
}

impl DiagnosticsConfig {
    /// Config with exactly the given detectors enabled, other values default.
    pub fn with_detectors(detectors: impl IntoIterator<Item = DetectorKind>) -> Self {
        Self {
            enabled_detectors: detectors.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn is_enabled(&self, kind: DetectorKind) -> bool {
        self.enabled_detectors.contains(&kind)
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled_detectors: DetectorKind::ALL.into_iter().collect(),
            thresholds: Thresholds::default(),
            weights: ScoreWeights::default(),
            location: LocationSettings::default(),
        }
    }
}
