//! Shared constants for the QueryCraft diagnostics engine.

/// Default minimum repetitions of one query shape before it counts as N+1.
pub const DEFAULT_N1_COUNT: u32 = 5;

/// Default slow query threshold in milliseconds.
pub const DEFAULT_SLOW_QUERY_MS: f64 = 100.0;

/// Default minimum identical executions before a query counts as duplicate.
pub const DEFAULT_DUPLICATE_COUNT: u32 = 2;

/// Smallest repetition threshold the config provider accepts.
pub const MIN_REPETITION_THRESHOLD: u32 = 2;

/// Default score weight for the query-count dimension.
pub const DEFAULT_WEIGHT_QUERY_COUNT: u32 = 40;

/// Default score weight for the query-time dimension.
pub const DEFAULT_WEIGHT_QUERY_TIME: u32 = 30;

/// Default score weight for the issue-penalty dimension.
pub const DEFAULT_WEIGHT_ISSUES: u32 = 30;

/// Maximum stack frames retained per captured query.
pub const MAX_CAPTURED_FRAMES: usize = 50;

/// Path fragments that mark framework, vendored, or QueryCraft frames.
pub const DEFAULT_SKIP_PATHS: &[&str] = &[
    "/vendor/",
    "/vendor/laravel/",
    "Illuminate/",
    "Sanctum/",
    "QueryCraft/",
    "QueryCollector",
];

/// Directory fragment for installed dependencies, used by the fallback pass.
pub const DEFAULT_DEPENDENCY_DIR: &str = "/vendor/";

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "querycraft.toml";

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "QUERYCRAFT_LOG";
