//! Diagnostics pipeline: detectors → aggregation → scoring → report.

pub mod report;

pub use report::DiagnosticsReport;

use std::sync::Arc;

use querycraft_core::config::DiagnosticsConfig;
use querycraft_core::tracing::metrics;
use querycraft_core::traits::{QueryPlanner, UnavailablePlanner};
use querycraft_core::types::QueryRecord;

use crate::aggregation::{IssueAggregator, IssueStatistics};
use crate::capture::CapturedQueries;
use crate::detectors::DetectionContext;
use crate::location::SourceLocationResolver;
use crate::scoring::PerformanceScorer;
use crate::suggestions::{RegexHints, SqlHints};

/// Owns the per-run configuration and collaborators.
///
/// `analyze` is a pure function of its input and the configuration, so one
/// pipeline can serve concurrent analyses.
pub struct DiagnosticsPipeline {
    config: DiagnosticsConfig,
    planner: Arc<dyn QueryPlanner>,
    resolver: SourceLocationResolver,
    hints: Box<dyn SqlHints>,
}

impl DiagnosticsPipeline {
    /// Pipeline without a planner: the missing-index detector finds nothing
    /// until one is supplied with [`with_planner`](Self::with_planner).
    pub fn new(config: DiagnosticsConfig) -> Self {
        let resolver = SourceLocationResolver::new(&config.location);
        Self {
            config,
            planner: Arc::new(UnavailablePlanner),
            resolver,
            hints: Box::new(RegexHints),
        }
    }

    pub fn with_planner(mut self, planner: Arc<dyn QueryPlanner>) -> Self {
        self.planner = planner;
        self
    }

    /// Replace the suggestion wording source.
    pub fn with_hints(mut self, hints: Box<dyn SqlHints>) -> Self {
        self.hints = hints;
        self
    }

    pub fn config(&self) -> &DiagnosticsConfig {
        &self.config
    }

    /// Analyze the queries one request executed.
    pub fn analyze(&self, queries: &[QueryRecord]) -> DiagnosticsReport {
        let total_time_ms = queries.iter().map(|q| q.duration_ms).sum();
        self.run(queries, total_time_ms)
    }

    /// Analyze the records drained from a capture session.
    pub fn analyze_capture(&self, captured: CapturedQueries) -> DiagnosticsReport {
        self.run(&captured.records, captured.total_time_ms)
    }

    fn run(&self, queries: &[QueryRecord], total_time_ms: f64) -> DiagnosticsReport {
        let span = tracing::info_span!(
            "diagnostics",
            query_count = tracing::field::Empty,
            total_time_ms = tracing::field::Empty,
            issue_count = tracing::field::Empty,
            score = tracing::field::Empty,
        );
        let _guard = span.enter();
        span.record(metrics::QUERY_COUNT, queries.len() as u64);
        span.record(metrics::TOTAL_TIME_MS, total_time_ms);

        let ctx = DetectionContext::new(queries, &self.resolver, self.hints.as_ref());
        let issues = IssueAggregator::new(&self.config, Arc::clone(&self.planner)).aggregate(&ctx);
        let statistics = IssueStatistics::from_issues(&issues);
        let score =
            PerformanceScorer::new(self.config.weights).score(queries.len(), total_time_ms, &issues);

        span.record(metrics::ISSUE_COUNT, issues.len() as u64);
        span.record(metrics::SCORE, u64::from(score.score));
        tracing::info!(
            query_count = queries.len(),
            issue_count = issues.len(),
            critical = statistics.critical,
            score = score.score,
            grade = %score.grade,
            "diagnostics complete"
        );

        DiagnosticsReport {
            query_count: queries.len(),
            total_time_ms,
            issues,
            score,
            statistics,
        }
    }
}

impl Default for DiagnosticsPipeline {
    fn default() -> Self {
        Self::new(DiagnosticsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureSession;
    use crate::scoring::Grade;
    use querycraft_core::types::{Binding, IssueKind, StackFrame};

    #[test]
    fn empty_run_is_perfect() {
        let report = DiagnosticsPipeline::default().analyze(&[]);
        assert_eq!(report.query_count, 0);
        assert_eq!(report.total_time_ms, 0.0);
        assert!(!report.has_issues());
        assert_eq!(report.score.score, 100);
        assert_eq!(report.score.grade, Grade::A);
        assert_eq!(report.statistics, IssueStatistics::default());
    }

    #[test]
    fn capture_session_feeds_pipeline() {
        let mut session = CaptureSession::start();
        for id in 1..=6 {
            session
                .record(
                    format!("select * from comments where post_id = {id}"),
                    vec![],
                    2.0,
                    vec![StackFrame::at("/app/Http/Controllers/PostController.php", 31)],
                )
                .unwrap();
        }
        session
            .record("select * from settings where key = ?", vec![Binding::from("theme")], 1.0, vec![])
            .unwrap();
        session
            .record("select * from settings where key = ?", vec![Binding::from("theme")], 1.0, vec![])
            .unwrap();

        let report = DiagnosticsPipeline::default().analyze_capture(session.finish());
        assert_eq!(report.query_count, 8);
        assert_eq!(report.total_time_ms, 14.0);

        let kinds: Vec<IssueKind> = report.issues.iter().map(|i| i.kind).collect();
        assert_eq!(kinds, [IssueKind::DuplicateQuery, IssueKind::NPlusOne]);
        assert_eq!(report.issues[1].location.to_string(), "/app/Http/Controllers/PostController.php:31");
    }
}
