//! Top-level QueryCraft configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    DetectorConfig, DiagnosticsConfig, LocationConfig, LocationSettings, ScoreWeights,
    ThresholdConfig, Thresholds, WeightConfig,
};
use crate::constants::{MIN_REPETITION_THRESHOLD, PROJECT_CONFIG_FILE};
use crate::errors::ConfigError;
use crate::types::DetectorKind;

/// Top-level configuration aggregating all sections.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`QUERYCRAFT_*`, `QUERY_DEBUGGER_*`)
/// 3. Project config (`querycraft.toml` in project root)
/// 4. User config (`~/.querycraft/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QueryCraftConfig {
    pub detectors: DetectorConfig,
    pub thresholds: ThresholdConfig,
    pub weights: WeightConfig,
    pub location: LocationConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// When set, exactly these detectors run.
    pub only_detectors: Option<Vec<DetectorKind>>,
    pub n1_count: Option<u32>,
    pub slow_query_ms: Option<f64>,
    pub duplicate_count: Option<u32>,
    pub project_root: Option<String>,
}

impl QueryCraftConfig {
    /// Load configuration with layered resolution for the project at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(err @ ConfigError::ParseError { .. }) => return Err(err),
                    Err(err) => {
                        tracing::warn!(
                            path = %user_config_path.display(),
                            error = %err,
                            "ignoring unreadable user config"
                        );
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        if config.location.project_root.is_none() {
            config.location.project_root = Some(root.display().to_string());
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    ///
    /// Weights are range-checked individually. A total other than 100 is
    /// accepted with a warning; the scorer applies whatever it is given.
    pub fn validate(config: &QueryCraftConfig) -> Result<(), ConfigError> {
        if let Some(n1) = config.thresholds.n1_count {
            if n1 < MIN_REPETITION_THRESHOLD {
                return Err(ConfigError::ValidationFailed {
                    field: "thresholds.n1_count".to_string(),
                    message: format!("must be at least {MIN_REPETITION_THRESHOLD}"),
                });
            }
        }
        if let Some(dup) = config.thresholds.duplicate_count {
            if dup < MIN_REPETITION_THRESHOLD {
                return Err(ConfigError::ValidationFailed {
                    field: "thresholds.duplicate_count".to_string(),
                    message: format!("must be at least {MIN_REPETITION_THRESHOLD}"),
                });
            }
        }
        if let Some(ms) = config.thresholds.slow_query_ms {
            if !ms.is_finite() || ms < 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: "thresholds.slow_query_ms".to_string(),
                    message: "must be a finite number >= 0".to_string(),
                });
            }
        }
        for (field, weight) in [
            ("weights.query_count", config.weights.query_count),
            ("weights.query_time", config.weights.query_time),
            ("weights.issues", config.weights.issues),
        ] {
            if weight.is_some_and(|w| w > 100) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be between 0 and 100".to_string(),
                });
            }
        }

        let total = config.weights.effective_query_count()
            + config.weights.effective_query_time()
            + config.weights.effective_issues();
        if total != 100 {
            tracing::warn!(total, "score weights do not total 100; scores will be scaled");
        }
        Ok(())
    }

    /// Resolve into the immutable per-run configuration.
    pub fn to_diagnostics_config(&self) -> DiagnosticsConfig {
        let enabled_detectors = DetectorKind::ALL
            .into_iter()
            .filter(|kind| self.detectors.is_enabled(*kind))
            .collect();

        let mut location = LocationSettings::default();
        if let Some(ref root) = self.location.project_root {
            location.project_root = root.clone();
        }
        location
            .skip_paths
            .extend(self.location.extra_skip_paths.iter().cloned());

        DiagnosticsConfig {
            enabled_detectors,
            thresholds: Thresholds {
                n1_count: self.thresholds.effective_n1_count(),
                slow_query_ms: self.thresholds.effective_slow_query_ms(),
                duplicate_count: self.thresholds.effective_duplicate_count(),
            },
            weights: ScoreWeights {
                query_count: self.weights.effective_query_count(),
                query_time: self.weights.effective_query_time(),
                issues: self.weights.effective_issues(),
            },
            location,
        }
    }

    /// Returns the user config path: `~/.querycraft/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".querycraft").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut QueryCraftConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: QueryCraftConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut QueryCraftConfig, other: &QueryCraftConfig) {
        // Detectors
        if other.detectors.n1.is_some() {
            base.detectors.n1 = other.detectors.n1;
        }
        if other.detectors.slow_query.is_some() {
            base.detectors.slow_query = other.detectors.slow_query;
        }
        if other.detectors.missing_index.is_some() {
            base.detectors.missing_index = other.detectors.missing_index;
        }
        if other.detectors.duplicate_query.is_some() {
            base.detectors.duplicate_query = other.detectors.duplicate_query;
        }

        // Thresholds
        if other.thresholds.n1_count.is_some() {
            base.thresholds.n1_count = other.thresholds.n1_count;
        }
        if other.thresholds.slow_query_ms.is_some() {
            base.thresholds.slow_query_ms = other.thresholds.slow_query_ms;
        }
        if other.thresholds.duplicate_count.is_some() {
            base.thresholds.duplicate_count = other.thresholds.duplicate_count;
        }

        // Weights
        if other.weights.query_count.is_some() {
            base.weights.query_count = other.weights.query_count;
        }
        if other.weights.query_time.is_some() {
            base.weights.query_time = other.weights.query_time;
        }
        if other.weights.issues.is_some() {
            base.weights.issues = other.weights.issues;
        }

        // Location
        if other.location.project_root.is_some() {
            base.location.project_root = other.location.project_root.clone();
        }
        if !other.location.extra_skip_paths.is_empty() {
            base.location.extra_skip_paths = other.location.extra_skip_paths.clone();
        }
    }

    /// Apply environment variable overrides. Unparseable values are ignored.
    fn apply_env_overrides(config: &mut QueryCraftConfig) {
        if let Some(v) = env_bool("QUERYCRAFT_DETECTOR_N1") {
            config.detectors.n1 = Some(v);
        }
        if let Some(v) = env_bool("QUERYCRAFT_DETECTOR_SLOW_QUERY") {
            config.detectors.slow_query = Some(v);
        }
        if let Some(v) = env_bool("QUERYCRAFT_DETECTOR_MISSING_INDEX") {
            config.detectors.missing_index = Some(v);
        }
        if let Some(v) = env_bool("QUERYCRAFT_DETECTOR_DUPLICATE_QUERY") {
            config.detectors.duplicate_query = Some(v);
        }
        if let Some(v) = env_parse::<u32>("QUERY_DEBUGGER_N1_THRESHOLD") {
            config.thresholds.n1_count = Some(v);
        }
        if let Some(v) = env_parse::<f64>("QUERY_DEBUGGER_SLOW_THRESHOLD") {
            config.thresholds.slow_query_ms = Some(v);
        }
        if let Some(v) = env_parse::<u32>("QUERYCRAFT_DUPLICATE_COUNT") {
            config.thresholds.duplicate_count = Some(v);
        }
        if let Some(v) = env_parse::<u32>("QUERYCRAFT_WEIGHT_QUERY_COUNT") {
            config.weights.query_count = Some(v);
        }
        if let Some(v) = env_parse::<u32>("QUERYCRAFT_WEIGHT_QUERY_TIME") {
            config.weights.query_time = Some(v);
        }
        if let Some(v) = env_parse::<u32>("QUERYCRAFT_WEIGHT_ISSUES") {
            config.weights.issues = Some(v);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut QueryCraftConfig, cli: &CliOverrides) {
        if let Some(ref only) = cli.only_detectors {
            config.detectors = DetectorConfig {
                n1: Some(only.contains(&DetectorKind::N1)),
                slow_query: Some(only.contains(&DetectorKind::SlowQuery)),
                missing_index: Some(only.contains(&DetectorKind::MissingIndex)),
                duplicate_query: Some(only.contains(&DetectorKind::DuplicateQuery)),
            };
        }
        if let Some(v) = cli.n1_count {
            config.thresholds.n1_count = Some(v);
        }
        if let Some(v) = cli.slow_query_ms {
            config.thresholds.slow_query_ms = Some(v);
        }
        if let Some(v) = cli.duplicate_count {
            config.thresholds.duplicate_count = Some(v);
        }
        if let Some(ref v) = cli.project_root {
            config.location.project_root = Some(v.clone());
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|val| val.trim().parse().ok())
}

/// Accepts `true/false`, `1/0`, `yes/no`, `on/off`.
fn env_bool(key: &str) -> Option<bool> {
    let val = std::env::var(key).ok()?;
    match val.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
