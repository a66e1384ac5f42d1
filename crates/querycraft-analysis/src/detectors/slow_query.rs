//! Slow query detector: single executions above a time threshold.

use querycraft_core::types::{DetectorKind, Issue, IssueKind, Severity};

use super::traits::{DetectionContext, Detector};

pub struct SlowQueryDetector {
    threshold_ms: f64,
}

impl SlowQueryDetector {
    pub fn new(threshold_ms: f64) -> Self {
        Self { threshold_ms }
    }

    /// Severity by absolute duration, independent of the threshold.
    pub fn severity_for(duration_ms: f64) -> Severity {
        if duration_ms > 1000.0 {
            Severity::Critical
        } else if duration_ms > 500.0 {
            Severity::High
        } else if duration_ms > 200.0 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

impl Detector for SlowQueryDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::SlowQuery
    }

    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Issue> {
        ctx.queries
            .iter()
            .filter(|q| q.duration_ms > self.threshold_ms)
            .map(|q| {
                Issue::new(IssueKind::SlowQuery, Self::severity_for(q.duration_ms), &q.sql)
                    .at(ctx.resolver.resolve(&q.call_stack))
                    .metric("time_ms", q.duration_ms)
                    .metric("threshold_ms", self.threshold_ms)
                    .suggest(ctx.hints.slow_query_hint(&q.sql))
            })
            .collect()
    }
}
