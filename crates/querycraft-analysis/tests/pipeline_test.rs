//! Full pipeline properties.

use std::sync::Arc;

use querycraft_analysis::capture::CaptureSession;
use querycraft_analysis::DiagnosticsPipeline;
use querycraft_core::config::{DiagnosticsConfig, LocationSettings};
use querycraft_core::errors::PlanError;
use querycraft_core::traits::{QueryPlan, QueryPlanner};
use querycraft_core::types::{Binding, DetectorKind, IssueKind, QueryRecord, Severity, StackFrame};

struct FullScanPlanner;

impl QueryPlanner for FullScanPlanner {
    fn explain(&self, sql: &str, _bindings: &[Binding]) -> Result<QueryPlan, PlanError> {
        if sql.trim_start().to_ascii_lowercase().starts_with("select") {
            Ok(QueryPlan::new("ALL", 12_000).on_table("orders"))
        } else {
            Err(PlanError::NotExplainable {
                statement: sql.to_string(),
            })
        }
    }
}

/// A request that loads a dashboard: one slow report, a per-row lookup
/// loop, a repeated settings read, and a write.
fn dashboard_request() -> Vec<QueryRecord> {
    let controller = vec![
        StackFrame::at("/srv/shop/vendor/laravel/framework/src/Illuminate/Database/Connection.php", 760),
        StackFrame::at("/srv/shop/app/Http/Controllers/DashboardController.php", 42),
    ];

    let mut queries = vec![QueryRecord::new(
        "select * from orders where created_at > '2024-01-01' order by total",
        640.0,
    )
    .with_call_stack(controller.clone())];

    for id in 1..=12 {
        queries.push(
            QueryRecord::new(format!("select * from customers where id = {id}"), 4.0)
                .with_call_stack(controller.clone()),
        );
    }
    for _ in 0..3 {
        queries.push(
            QueryRecord::new("select value from settings where key = ?", 0.5)
                .with_bindings(vec![Binding::from("currency")]),
        );
    }
    queries.push(
        QueryRecord::new("update sessions set last_seen = ? where id = ?", 1.5)
            .with_bindings(vec![Binding::Int(1700000000), Binding::Text("abc".to_string())]),
    );
    queries
}

fn config() -> DiagnosticsConfig {
    DiagnosticsConfig {
        location: LocationSettings {
            project_root: "/srv/shop".to_string(),
            ..LocationSettings::default()
        },
        ..DiagnosticsConfig::default()
    }
}

#[test]
fn counts_and_time_are_independent_of_detectors() {
    let queries = dashboard_request();
    let expected_time: f64 = queries.iter().map(|q| q.duration_ms).sum();

    for enabled in [
        DetectorKind::ALL.to_vec(),
        vec![DetectorKind::SlowQuery],
        Vec::new(),
    ] {
        let config = DiagnosticsConfig {
            enabled_detectors: enabled.into_iter().collect(),
            ..config()
        };
        let report = DiagnosticsPipeline::new(config).analyze(&queries);
        assert_eq!(report.query_count, queries.len());
        assert_eq!(report.total_time_ms, expected_time);
    }
}

#[test]
fn disabling_all_detectors_yields_no_issues() {
    let config = DiagnosticsConfig {
        enabled_detectors: Default::default(),
        ..config()
    };
    let report = DiagnosticsPipeline::new(config)
        .with_planner(Arc::new(FullScanPlanner))
        .analyze(&dashboard_request());
    assert!(report.issues.is_empty());
    assert_eq!(report.score.breakdown.issues, 100);
    assert_eq!(report.statistics.total, 0);
}

#[test]
fn issues_sorted_by_severity_with_detector_order_preserved() {
    let report = DiagnosticsPipeline::new(config())
        .with_planner(Arc::new(FullScanPlanner))
        .analyze(&dashboard_request());

    let ranks: Vec<u8> = report.issues.iter().map(|i| i.severity.rank()).collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "{ranks:?}");

    // Every select is a 12k-row full scan (high); the slow report is high too.
    // Within "high": missing_index issues precede the slow_query issue.
    let high: Vec<IssueKind> = report
        .issues
        .iter()
        .filter(|i| i.severity == Severity::High)
        .map(|i| i.kind)
        .collect();
    let first_slow = high.iter().position(|k| *k == IssueKind::SlowQuery);
    let last_index = high.iter().rposition(|k| *k == IssueKind::MissingIndex);
    assert!(matches!((last_index, first_slow), (Some(l), Some(s)) if l < s));

    assert_eq!(report.statistics.total, report.issues.len());
    assert_eq!(report.statistics.by_kind.get(&IssueKind::NPlusOne), Some(&1));
    assert_eq!(report.statistics.by_kind.get(&IssueKind::DuplicateQuery), Some(&1));
    assert_eq!(report.statistics.by_kind.get(&IssueKind::MissingIndex), Some(&16));
}

#[test]
fn n_plus_one_location_is_relative_to_project_root() {
    let config = DiagnosticsConfig {
        enabled_detectors: [DetectorKind::N1].into_iter().collect(),
        ..config()
    };
    let report = DiagnosticsPipeline::new(config).analyze(&dashboard_request());
    assert_eq!(report.issues.len(), 1);
    assert_eq!(
        report.issues[0].location.to_string(),
        "/app/Http/Controllers/DashboardController.php:42"
    );
    assert_eq!(report.issues[0].severity, Severity::Medium);
}

#[test]
fn report_json_is_identical_across_runs() {
    let pipeline = DiagnosticsPipeline::new(config()).with_planner(Arc::new(FullScanPlanner));
    let queries = dashboard_request();
    let first = pipeline.analyze(&queries).to_json().unwrap();
    let second = pipeline.analyze(&queries).to_json().unwrap();
    assert_eq!(first, second);

    let value: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(value["query_count"], 17);
    assert!(value["score"]["grade"].is_string());
    assert!(value["statistics"]["by_kind"]["n_plus_one"].is_number());
}

#[test]
fn duplicates_ignore_unrelated_queries_between_them() {
    let lookup = |id: i64| {
        QueryRecord::new("select * from users where id = ?", 1.0).with_bindings(vec![Binding::Int(id)])
    };
    let queries = vec![
        QueryRecord::new("select * from teams where id = ?", 1.0).with_bindings(vec![Binding::Int(3)]),
        lookup(5),
        QueryRecord::new("select * from teams where id = ?", 1.0).with_bindings(vec![Binding::Int(4)]),
        lookup(5),
        lookup(6),
    ];
    let config = DiagnosticsConfig::with_detectors([DetectorKind::DuplicateQuery]);
    let report = DiagnosticsPipeline::new(config).analyze(&queries);

    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].get_metric("count"), Some(2.0));
    assert_eq!(report.issues[0].bindings, Some(vec![Binding::Int(5)]));
}

#[test]
fn captured_session_matches_direct_analysis() {
    let queries = dashboard_request();
    let mut session = CaptureSession::start();
    for q in &queries {
        session
            .record(q.sql.clone(), q.bindings.clone(), q.duration_ms, q.call_stack.clone())
            .unwrap();
    }

    let pipeline = DiagnosticsPipeline::new(config());
    let direct = pipeline.analyze(&queries);
    let captured = pipeline.analyze_capture(session.finish());

    assert_eq!(captured.query_count, direct.query_count);
    assert_eq!(captured.issues, direct.issues);
    assert_eq!(captured.score, direct.score);
}
