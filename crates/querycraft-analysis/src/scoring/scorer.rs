//! Weighted performance scorer.

use querycraft_core::config::ScoreWeights;
use querycraft_core::types::Issue;

use super::types::{Grade, ScoreBreakdown, ScoreResult, ScoreSuggestion};

/// Sub-scores below this count as needing attention (count and time).
const GOOD_SUB_SCORE: u32 = 80;

pub struct PerformanceScorer {
    weights: ScoreWeights,
}

impl PerformanceScorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// Score one request's queries and issues.
    ///
    /// `final = round(Σ sub_score × weight / 100)`. Weights are applied as
    /// given; a total other than 100 scales the result and is not clamped.
    pub fn score(&self, query_count: usize, total_time_ms: f64, issues: &[Issue]) -> ScoreResult {
        let breakdown = ScoreBreakdown {
            query_count: query_count_score(query_count),
            query_time: query_time_score(total_time_ms),
            issues: issue_score(issues),
        };

        let weighted = f64::from(breakdown.query_count) * f64::from(self.weights.query_count)
            + f64::from(breakdown.query_time) * f64::from(self.weights.query_time)
            + f64::from(breakdown.issues) * f64::from(self.weights.issues);
        let score = (weighted / 100.0).round() as u32;

        ScoreResult {
            score,
            grade: Grade::from_score(score),
            breakdown,
            suggestions: suggestions(&breakdown, issues.len()),
        }
    }
}

impl Default for PerformanceScorer {
    fn default() -> Self {
        Self::new(ScoreWeights::default())
    }
}

/// Step function on the number of queries.
pub fn query_count_score(count: usize) -> u32 {
    match count {
        0..=5 => 100,
        6..=10 => 90,
        11..=20 => 75,
        21..=30 => 60,
        31..=50 => 40,
        51..=100 => 20,
        _ => 0,
    }
}

/// Step function on total query time.
pub fn query_time_score(total_time_ms: f64) -> u32 {
    if total_time_ms < 50.0 {
        100
    } else if total_time_ms < 100.0 {
        90
    } else if total_time_ms < 200.0 {
        75
    } else if total_time_ms < 500.0 {
        50
    } else if total_time_ms < 1000.0 {
        25
    } else {
        0
    }
}

/// `100 - Σ penalty`, floored at 0. Low-severity issues cost nothing.
pub fn issue_score(issues: &[Issue]) -> u32 {
    let penalty: u32 = issues.iter().map(|i| i.severity.penalty()).sum();
    100u32.saturating_sub(penalty)
}

fn suggestions(breakdown: &ScoreBreakdown, issue_count: usize) -> Vec<ScoreSuggestion> {
    let mut out = Vec::new();

    if breakdown.query_count < GOOD_SUB_SCORE {
        out.push(ScoreSuggestion {
            issue: "Too many queries".to_string(),
            impact: 100 - breakdown.query_count,
            fix: "Use eager loading to reduce query count".to_string(),
        });
    }
    if breakdown.query_time < GOOD_SUB_SCORE {
        out.push(ScoreSuggestion {
            issue: "Slow query execution time".to_string(),
            impact: 100 - breakdown.query_time,
            fix: "Add indexes or optimize queries".to_string(),
        });
    }
    if breakdown.issues < 100 {
        out.push(ScoreSuggestion {
            issue: format!("{issue_count} performance issues detected"),
            impact: 100 - breakdown.issues,
            fix: "Fix critical and high severity issues first".to_string(),
        });
    }

    // Stable: ties keep count, time, issues order.
    out.sort_by(|a, b| b.impact.cmp(&a.impact));
    out
}
