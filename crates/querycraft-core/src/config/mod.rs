//! Configuration system for QueryCraft.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.
//! `QueryCraftConfig` is the persisted form; `DiagnosticsConfig` is the
//! resolved, immutable value one analysis run receives.

pub mod detector_config;
pub mod diagnostics_config;
pub mod location_config;
pub mod querycraft_config;
pub mod threshold_config;
pub mod weight_config;

pub use detector_config::DetectorConfig;
pub use diagnostics_config::{DiagnosticsConfig, LocationSettings, ScoreWeights, Thresholds};
pub use location_config::LocationConfig;
pub use querycraft_config::{CliOverrides, QueryCraftConfig};
pub use threshold_config::ThresholdConfig;
pub use weight_config::WeightConfig;
