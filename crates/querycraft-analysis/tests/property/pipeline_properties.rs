use proptest::prelude::*;
use querycraft_analysis::DiagnosticsPipeline;
use querycraft_core::config::DiagnosticsConfig;
use querycraft_core::types::{Binding, DetectorKind, QueryRecord};

fn arb_query() -> impl Strategy<Value = QueryRecord> {
    (
        prop_oneof![
            Just("select * from posts where id = ?"),
            Just("select * from users where email = ?"),
            Just("select count(*) from orders"),
            Just("update carts set qty = ? where id = ?"),
        ],
        0i64..5,
        0.0f64..1500.0,
    )
        .prop_map(|(sql, id, ms)| QueryRecord::new(sql, ms).with_bindings(vec![Binding::Int(id)]))
}

proptest! {
    #[test]
    fn report_totals_and_ordering_hold(queries in prop::collection::vec(arb_query(), 0..40)) {
        let report = DiagnosticsPipeline::new(DiagnosticsConfig::default()).analyze(&queries);
        let expected: f64 = queries.iter().map(|q| q.duration_ms).sum();

        prop_assert_eq!(report.query_count, queries.len());
        prop_assert_eq!(report.total_time_ms, expected);
        prop_assert!(report
            .issues
            .windows(2)
            .all(|w| w[0].severity.rank() <= w[1].severity.rank()));
        prop_assert_eq!(report.statistics.total, report.issues.len());
    }

    #[test]
    fn no_detectors_no_issues(queries in prop::collection::vec(arb_query(), 0..40)) {
        let config = DiagnosticsConfig::with_detectors(Vec::<DetectorKind>::new());
        let report = DiagnosticsPipeline::new(config).analyze(&queries);
        prop_assert!(report.issues.is_empty());
        prop_assert_eq!(report.score.breakdown.issues, 100);
    }
}
