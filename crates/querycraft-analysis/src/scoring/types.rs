//! Scoring output types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Letter grade derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// `≥90→A, ≥80→B, ≥70→C, ≥60→D, else F`.
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => Self::A,
            80..=89 => Self::B,
            70..=79 => Self::C,
            60..=69 => Self::D,
            _ => Self::F,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three sub-scores, each 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub query_count: u32,
    pub query_time: u32,
    pub issues: u32,
}

impl ScoreBreakdown {
    pub const PERFECT: Self = Self {
        query_count: 100,
        query_time: 100,
        issues: 100,
    };
}

/// One improvement suggestion. `impact` is `100 - sub_score`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSuggestion {
    pub issue: String,
    pub impact: u32,
    pub fix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Weighted score, rounded. Exceeds 100 only when weights total over 100.
    pub score: u32,
    pub grade: Grade,
    pub breakdown: ScoreBreakdown,
    /// Highest impact first.
    pub suggestions: Vec<ScoreSuggestion>,
}
