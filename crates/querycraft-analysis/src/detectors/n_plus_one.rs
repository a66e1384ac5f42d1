//! N+1 detector: one query shape repeated with only literal values changing.

use querycraft_core::types::{DetectorKind, Issue, IssueKind, QueryRecord, Severity};

use super::grouping::{group_by_key, total_time_ms};
use super::traits::{DetectionContext, Detector};
use crate::normalizer::structural_pattern;

pub struct N1Detector {
    threshold: usize,
}

impl N1Detector {
    /// Thresholds below 2 are raised to 2; one execution is never a pattern.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: (threshold as usize).max(2),
        }
    }

    /// Severity from repetition count and combined time.
    pub fn severity_for(count: usize, total_time_ms: f64) -> Severity {
        if count > 50 || total_time_ms > 1000.0 {
            Severity::Critical
        } else if count > 20 || total_time_ms > 500.0 {
            Severity::High
        } else if count > 10 || total_time_ms > 200.0 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    fn analyze_group(&self, group: &[&QueryRecord], ctx: &DetectionContext<'_>) -> Issue {
        let first = group[0];
        let count = group.len();
        let total = total_time_ms(group);

        Issue::new(IssueKind::NPlusOne, Self::severity_for(count, total), &first.sql)
            .at(ctx.resolver.resolve(&first.call_stack))
            .metric("count", count as f64)
            .metric("total_time_ms", total)
            .metric("avg_time_ms", total / count as f64)
            .suggest(ctx.hints.eager_load_hint(&first.sql))
    }
}

impl Detector for N1Detector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::N1
    }

    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Issue> {
        group_by_key(ctx.queries, |q| structural_pattern(&q.sql))
            .into_iter()
            .filter(|group| group.len() >= self.threshold)
            .map(|group| self.analyze_group(&group, ctx))
            .collect()
    }
}
