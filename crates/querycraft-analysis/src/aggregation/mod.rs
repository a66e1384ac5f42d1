//! Issue aggregator: runs the enabled detectors in a fixed order and
//! merges their output into one severity-sorted list.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use querycraft_core::config::DiagnosticsConfig;
use querycraft_core::tracing::metrics;
use querycraft_core::traits::QueryPlanner;
use querycraft_core::types::{DetectorKind, Issue, IssueKind, Severity};

use crate::detectors::{
    DetectionContext, Detector, DuplicateQueryDetector, MissingIndexDetector, N1Detector,
    SlowQueryDetector,
};

/// Runs detectors in order and stably sorts their combined issues.
pub struct IssueAggregator {
    detectors: Vec<Box<dyn Detector>>,
}

impl IssueAggregator {
    /// Build the detectors enabled in `config`, in `DetectorKind::ALL` order,
    /// each with its configured threshold.
    pub fn new(config: &DiagnosticsConfig, planner: Arc<dyn QueryPlanner>) -> Self {
        let detectors = DetectorKind::ALL
            .into_iter()
            .filter(|kind| config.is_enabled(*kind))
            .map(|kind| -> Box<dyn Detector> {
                match kind {
                    DetectorKind::N1 => Box::new(N1Detector::new(config.thresholds.n1_count)),
                    DetectorKind::MissingIndex => {
                        Box::new(MissingIndexDetector::new(Arc::clone(&planner)))
                    }
                    DetectorKind::SlowQuery => {
                        Box::new(SlowQueryDetector::new(config.thresholds.slow_query_ms))
                    }
                    DetectorKind::DuplicateQuery => {
                        Box::new(DuplicateQueryDetector::new(config.thresholds.duplicate_count))
                    }
                }
            })
            .collect();
        Self { detectors }
    }

    /// Aggregator over a caller-chosen detector list, run in list order.
    pub fn with_detectors(detectors: Vec<Box<dyn Detector>>) -> Self {
        Self { detectors }
    }

    pub fn detector_kinds(&self) -> Vec<DetectorKind> {
        self.detectors.iter().map(|d| d.kind()).collect()
    }

    /// Run every detector and return the merged issues, critical first.
    /// Equal severities keep detector emission order.
    pub fn aggregate(&self, ctx: &DetectionContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();

        for detector in &self.detectors {
            let span = tracing::debug_span!(
                "detector",
                detector = %detector.kind(),
                issue_count = tracing::field::Empty,
                detection_time_ms = tracing::field::Empty,
                plan_skipped = tracing::field::Empty,
            );
            let _guard = span.enter();

            let start = Instant::now();
            let found = detector.detect(ctx);
            let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

            span.record(metrics::ISSUE_COUNT, found.len() as u64);
            span.record(metrics::DETECTION_TIME_MS, elapsed_ms);
            tracing::debug!(issue_count = found.len(), elapsed_ms, "detector finished");
            issues.extend(found);
        }

        sort_by_severity(&mut issues);
        issues
    }
}

/// Stable sort by severity rank.
pub fn sort_by_severity(issues: &mut [Issue]) {
    issues.sort_by_key(|issue| issue.severity.rank());
}

/// Issue counts for a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueStatistics {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub by_kind: BTreeMap<IssueKind, usize>,
}

impl IssueStatistics {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut stats = Self {
            total: issues.len(),
            ..Self::default()
        };
        for issue in issues {
            match issue.severity {
                Severity::Critical => stats.critical += 1,
                Severity::High => stats.high += 1,
                Severity::Medium => stats.medium += 1,
                Severity::Low => stats.low += 1,
            }
            *stats.by_kind.entry(issue.kind).or_insert(0) += 1;
        }
        stats
    }

    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }
}
