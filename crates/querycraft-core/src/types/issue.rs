//! Detected issues and their classification.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::query::Binding;
use crate::errors::ConfigError;

/// Issue importance. Declared low to critical so `Ord` matches severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Sort rank: critical first.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// Points subtracted from the issue sub-score per issue of this severity.
    pub const fn penalty(self) -> u32 {
        match self {
            Self::Critical => 40,
            Self::High => 20,
            Self::Medium => 10,
            Self::Low => 0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn all() -> &'static [Severity] {
        &[Self::Critical, Self::High, Self::Medium, Self::Low]
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(ConfigError::InvalidValue {
                field: "severity".to_string(),
                message: format!("unknown severity '{other}'"),
            }),
        }
    }
}

/// The anti-pattern an issue reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    NPlusOne,
    SlowQuery,
    MissingIndex,
    DuplicateQuery,
}

impl IssueKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NPlusOne => "n_plus_one",
            Self::SlowQuery => "slow_query",
            Self::MissingIndex => "missing_index",
            Self::DuplicateQuery => "duplicate_query",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detector that can be switched on or off in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorKind {
    N1,
    MissingIndex,
    SlowQuery,
    DuplicateQuery,
}

impl DetectorKind {
    /// Every detector, in execution order.
    pub const ALL: [DetectorKind; 4] = [
        Self::N1,
        Self::MissingIndex,
        Self::SlowQuery,
        Self::DuplicateQuery,
    ];

    /// The issue kind this detector emits.
    pub const fn issue_kind(self) -> IssueKind {
        match self {
            Self::N1 => IssueKind::NPlusOne,
            Self::MissingIndex => IssueKind::MissingIndex,
            Self::SlowQuery => IssueKind::SlowQuery,
            Self::DuplicateQuery => IssueKind::DuplicateQuery,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::N1 => "n1",
            Self::MissingIndex => "missing_index",
            Self::SlowQuery => "slow_query",
            Self::DuplicateQuery => "duplicate_query",
        }
    }
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application file and line an issue is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Sentinel for a call stack with no application frame.
    pub fn unknown() -> Self {
        Self::new("Unknown", 0)
    }

    pub fn is_unknown(&self) -> bool {
        self.file == "Unknown" && self.line == 0
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// One detected anti-pattern. Built once by a detector, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    /// Representative SQL for the group.
    pub query: String,
    pub location: SourceLocation,
    /// Kind-specific measurements, keyed by name.
    pub metrics: BTreeMap<String, f64>,
    /// Remediation hint.
    pub suggestion: String,
    /// Table reported by the query plan (missing-index issues).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    /// Bindings of the first execution (duplicate issues).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bindings: Option<Vec<Binding>>,
}

impl Issue {
    pub fn new(kind: IssueKind, severity: Severity, query: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            query: query.into(),
            location: SourceLocation::unknown(),
            metrics: BTreeMap::new(),
            suggestion: String::new(),
            table: None,
            bindings: None,
        }
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    /// Record a metric, rounded to two decimals.
    pub fn metric(mut self, name: &str, value: f64) -> Self {
        self.metrics.insert(name.to_string(), round2(value));
        self
    }

    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = suggestion.into();
        self
    }

    pub fn with_table(mut self, table: Option<String>) -> Self {
        self.table = table;
        self
    }

    pub fn with_bindings(mut self, bindings: Vec<Binding>) -> Self {
        self.bindings = Some(bindings);
        self
    }

    /// Look up a metric by name.
    pub fn get_metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
