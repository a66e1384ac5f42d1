use proptest::prelude::*;
use querycraft_analysis::scoring::{Grade, PerformanceScorer};
use querycraft_core::types::{Issue, IssueKind, Severity};

fn arb_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Low),
        Just(Severity::Medium),
        Just(Severity::High),
        Just(Severity::Critical),
    ]
}

fn arb_issues() -> impl Strategy<Value = Vec<Issue>> {
    prop::collection::vec(arb_severity(), 0..12).prop_map(|severities| {
        severities
            .into_iter()
            .map(|s| Issue::new(IssueKind::SlowQuery, s, "select 1"))
            .collect()
    })
}

proptest! {
    #[test]
    fn default_weights_stay_in_range(
        count in 0usize..500,
        time in 0.0f64..5000.0,
        issues in arb_issues(),
    ) {
        let result = PerformanceScorer::default().score(count, time, &issues);
        prop_assert!(result.score <= 100);
        prop_assert!(result.breakdown.issues <= 100);
        prop_assert_eq!(result.grade, Grade::from_score(result.score));
    }

    #[test]
    fn suggestions_never_increase_in_impact(
        count in 0usize..500,
        time in 0.0f64..5000.0,
        issues in arb_issues(),
    ) {
        let result = PerformanceScorer::default().score(count, time, &issues);
        prop_assert!(result.suggestions.windows(2).all(|w| w[0].impact >= w[1].impact));
        prop_assert!(result.suggestions.len() <= 3);
    }

    #[test]
    fn more_queries_never_score_higher(a in 0usize..300, b in 0usize..300) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let scorer = PerformanceScorer::default();
        prop_assert!(scorer.score(lo, 0.0, &[]).score >= scorer.score(hi, 0.0, &[]).score);
    }
}
