//! Source location resolution settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LocationConfig {
    /// Application root that frame paths are relativized against.
    /// Default: the directory the config was loaded for.
    pub project_root: Option<String>,
    /// Path fragments skipped in addition to the built-in list.
    #[serde(default)]
    pub extra_skip_paths: Vec<String>,
}
