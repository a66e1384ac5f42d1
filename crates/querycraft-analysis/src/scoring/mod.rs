//! Performance scoring: three sub-scores combined by configured weights
//! into a 0–100 score, a letter grade, and ranked suggestions.

pub mod scorer;
pub mod types;

pub use scorer::PerformanceScorer;
pub use types::{Grade, ScoreBreakdown, ScoreResult, ScoreSuggestion};
