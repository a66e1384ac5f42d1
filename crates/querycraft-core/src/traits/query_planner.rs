//! QueryPlanner trait: the EXPLAIN collaborator.
//!
//! The core never talks to a database. Hosts that can run `EXPLAIN`
//! implement this trait; standalone runs use `UnavailablePlanner`, which
//! makes the missing-index detector a no-op.

use serde::{Deserialize, Serialize};

use crate::errors::PlanError;
use crate::types::Binding;

/// Execution plan for one statement, reduced to what index analysis reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPlan {
    /// Table the plan row refers to, if reported.
    pub table: Option<String>,
    /// Access type, e.g. `ALL`, `ref`, `range`.
    pub scan_type: String,
    /// Estimated rows examined.
    pub rows_examined: u64,
    /// Free-form planner notes, e.g. `Using where; Using filesort`.
    pub extra: String,
}

impl QueryPlan {
    pub fn new(scan_type: impl Into<String>, rows_examined: u64) -> Self {
        Self {
            table: None,
            scan_type: scan_type.into(),
            rows_examined,
            extra: String::new(),
        }
    }

    pub fn on_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }

    /// Full table scan (`ALL` access type).
    pub fn is_full_table_scan(&self) -> bool {
        self.scan_type.eq_ignore_ascii_case("ALL")
    }

    /// ORDER BY resolved by an on-the-fly sort.
    pub fn uses_filesort(&self) -> bool {
        self.extra.contains("Using filesort")
    }

    /// A temporary table was materialized.
    pub fn uses_temporary(&self) -> bool {
        self.extra.contains("Using temporary")
    }
}

/// Provider of execution plans.
///
/// Implementations may be slow or fail per statement; callers treat every
/// `Err` as "skip this query".
pub trait QueryPlanner: Send + Sync {
    fn explain(&self, sql: &str, bindings: &[Binding]) -> Result<QueryPlan, PlanError>;
}

/// Planner for standalone mode: no database, every statement unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailablePlanner;

impl QueryPlanner for UnavailablePlanner {
    fn explain(&self, _sql: &str, _bindings: &[Binding]) -> Result<QueryPlan, PlanError> {
        Err(PlanError::PlanUnavailable {
            reason: "no query planner configured".to_string(),
        })
    }
}
