//! Duplicate query detector: identical SQL and bindings executed repeatedly.

use querycraft_core::types::{DetectorKind, Issue, IssueKind, Severity};

use super::grouping::{group_by_key, total_time_ms};
use super::traits::{DetectionContext, Detector};
use crate::normalizer::fingerprint;

pub struct DuplicateQueryDetector {
    min_count: usize,
}

impl DuplicateQueryDetector {
    pub fn new(min_count: u32) -> Self {
        Self {
            min_count: min_count as usize,
        }
    }
}

impl Detector for DuplicateQueryDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::DuplicateQuery
    }

    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Issue> {
        group_by_key(ctx.queries, |q| fingerprint(&q.sql, &q.bindings))
            .into_iter()
            .filter(|group| group.len() >= self.min_count.max(2))
            .map(|group| {
                let first = group[0];
                Issue::new(IssueKind::DuplicateQuery, Severity::Medium, &first.sql)
                    .at(ctx.resolver.resolve(&first.call_stack))
                    .metric("count", group.len() as f64)
                    .metric("total_time_ms", total_time_ms(&group))
                    .suggest(ctx.hints.duplicate_hint(&first.sql, group.len()))
                    .with_bindings(first.bindings.clone())
            })
            .collect()
    }
}
