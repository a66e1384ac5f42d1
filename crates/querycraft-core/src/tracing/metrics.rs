//! Structured span field names used across QueryCraft.
//!
//! Consistent names let log queries and dashboards aggregate by field.

/// Number of queries handed to one analysis run.
pub const QUERY_COUNT: &str = "query_count";

/// Sum of query durations in milliseconds.
pub const TOTAL_TIME_MS: &str = "total_time_ms";

/// Detector wall time in milliseconds.
pub const DETECTION_TIME_MS: &str = "detection_time_ms";

/// Issues emitted by one detector or one run.
pub const ISSUE_COUNT: &str = "issue_count";

/// Queries skipped because the planner could not explain them.
pub const PLAN_SKIPPED: &str = "plan_skipped";

/// Final composite score.
pub const SCORE: &str = "score";
