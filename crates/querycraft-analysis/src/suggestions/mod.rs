//! Remediation text for detected issues.
//!
//! Detection never depends on this module: detectors decide *whether* and
//! *how severe*, then ask a `SqlHints` implementation for the wording. The
//! default implementation reads SQL with regexes and is best-effort; a real
//! SQL parser can replace it behind the same trait.

pub mod regex_hints;

pub use regex_hints::RegexHints;

/// Produces human-readable fixes from raw SQL text.
pub trait SqlHints: Send + Sync {
    /// Hint for a query that exceeded the slow threshold.
    fn slow_query_hint(&self, sql: &str) -> String;

    /// Hint for a query shape repeated once per row.
    fn eager_load_hint(&self, sql: &str) -> String;

    /// Hint for a query whose plan shows a missing index.
    fn index_hint(&self, sql: &str) -> String;

    /// Hint for a query executed repeatedly with identical bindings.
    fn duplicate_hint(&self, _sql: &str, count: usize) -> String {
        format!("Cache this query result - executed {count} times with identical parameters")
    }
}
