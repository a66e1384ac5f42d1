//! Missing index detector: reads execution plans from the planner
//! collaborator. A statement the planner cannot explain is skipped; the
//! rest of the batch is unaffected.

use std::sync::Arc;

use querycraft_core::errors::ErrorCode;
use querycraft_core::tracing::metrics;
use querycraft_core::traits::{QueryPlan, QueryPlanner};
use querycraft_core::types::{DetectorKind, Issue, IssueKind, Severity};

use super::traits::{DetectionContext, Detector};

/// Examined-row estimate above which a full table scan is flagged.
const FULL_SCAN_ROW_LIMIT: u64 = 1000;

pub struct MissingIndexDetector {
    planner: Arc<dyn QueryPlanner>,
}

impl MissingIndexDetector {
    pub fn new(planner: Arc<dyn QueryPlanner>) -> Self {
        Self { planner }
    }

    /// A plan needs an index when it scans a large table in full, sorts on
    /// the fly, or materializes a temporary table.
    pub fn needs_index(plan: &QueryPlan) -> bool {
        (plan.is_full_table_scan() && plan.rows_examined > FULL_SCAN_ROW_LIMIT)
            || plan.uses_filesort()
            || plan.uses_temporary()
    }

    pub fn severity_for(rows_examined: u64) -> Severity {
        if rows_examined > 100_000 {
            Severity::Critical
        } else if rows_examined > 10_000 {
            Severity::High
        } else if rows_examined > 1_000 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

impl Detector for MissingIndexDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::MissingIndex
    }

    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut skipped = 0usize;

        for query in ctx.queries {
            let plan = match self.planner.explain(&query.sql, &query.bindings) {
                Ok(plan) => plan,
                Err(e) => {
                    skipped += 1;
                    tracing::debug!(
                        error_code = e.error_code(),
                        error = %e,
                        sql = %query.sql,
                        "skipping query without plan"
                    );
                    continue;
                }
            };

            if !Self::needs_index(&plan) {
                continue;
            }

            issues.push(
                Issue::new(
                    IssueKind::MissingIndex,
                    Self::severity_for(plan.rows_examined),
                    &query.sql,
                )
                .at(ctx.resolver.resolve(&query.call_stack))
                .metric("rows_examined", plan.rows_examined as f64)
                .suggest(ctx.hints.index_hint(&query.sql))
                .with_table(plan.table),
            );
        }

        if skipped > 0 {
            tracing::Span::current().record(metrics::PLAN_SKIPPED, skipped as u64);
            tracing::debug!(plan_skipped = skipped, "queries skipped by missing-index detector");
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::SourceLocationResolver;
    use crate::suggestions::RegexHints;
    use querycraft_core::errors::PlanError;
    use querycraft_core::types::{Binding, QueryRecord};

    /// Plans keyed by SQL prefix; anything else is unexplainable.
    struct ScriptedPlanner;

    impl QueryPlanner for ScriptedPlanner {
        fn explain(&self, sql: &str, _bindings: &[Binding]) -> Result<QueryPlan, PlanError> {
            if sql.starts_with("select * from orders") {
                Ok(QueryPlan::new("ALL", 250_000).on_table("orders"))
            } else if sql.starts_with("select * from users") {
                Ok(QueryPlan::new("ref", 1).on_table("users"))
            } else if sql.starts_with("select * from logs") {
                Ok(QueryPlan::new("index", 50).with_extra("Using index; Using filesort"))
            } else {
                Err(PlanError::NotExplainable {
                    statement: sql.to_string(),
                })
            }
        }
    }

    fn run(queries: &[QueryRecord]) -> Vec<Issue> {
        let resolver = SourceLocationResolver::default();
        let ctx = DetectionContext::new(queries, &resolver, &RegexHints);
        MissingIndexDetector::new(Arc::new(ScriptedPlanner)).detect(&ctx)
    }

    #[test]
    fn flags_full_scan_and_filesort_skips_failures() {
        let queries = vec![
            QueryRecord::new("insert into audit values (?)", 1.0),
            QueryRecord::new("select * from orders where status = ?", 80.0),
            QueryRecord::new("select * from users where id = ?", 0.2),
            QueryRecord::new("select * from logs order by created_at", 3.0),
        ];
        let issues = run(&queries);
        assert_eq!(issues.len(), 2);

        assert_eq!(issues[0].severity, Severity::Critical);
        assert_eq!(issues[0].table.as_deref(), Some("orders"));
        assert_eq!(issues[0].get_metric("rows_examined"), Some(250_000.0));
        assert_eq!(issues[0].suggestion, "Add index: $table->index('status')");

        assert_eq!(issues[1].severity, Severity::Low);
        assert_eq!(issues[1].suggestion, "Add index: $table->index('created_at')");
    }

    #[test]
    fn small_full_scan_is_fine() {
        assert!(!MissingIndexDetector::needs_index(&QueryPlan::new("ALL", 1000)));
        assert!(MissingIndexDetector::needs_index(&QueryPlan::new("ALL", 1001)));
        assert!(MissingIndexDetector::needs_index(
            &QueryPlan::new("ref", 10).with_extra("Using temporary")
        ));
    }

    #[test]
    fn severity_bands() {
        assert_eq!(MissingIndexDetector::severity_for(1_000), Severity::Low);
        assert_eq!(MissingIndexDetector::severity_for(1_001), Severity::Medium);
        assert_eq!(MissingIndexDetector::severity_for(10_001), Severity::High);
        assert_eq!(MissingIndexDetector::severity_for(100_001), Severity::Critical);
    }
}
