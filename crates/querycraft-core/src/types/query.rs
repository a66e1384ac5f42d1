//! Captured query executions.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One scalar parameter bound to a placeholder at execution time.
///
/// Serialized untagged, so a binding list has the same JSON shape the
/// database driver reported: `[1, "x", null, true, 2.5]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Binding {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "'{s}'"),
        }
    }
}

impl From<i64> for Binding {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Binding {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Binding {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Binding {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Binding {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// One frame of the call stack active when a query ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    pub file: Option<String>,
    pub line: Option<u32>,
    pub function: Option<String>,
    pub class: Option<String>,
}

impl StackFrame {
    /// Frame pointing at `file:line`, without function or class.
    pub fn at(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: Some(file.into()),
            line: Some(line),
            function: None,
            class: None,
        }
    }
}

/// One executed statement. Immutable once captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    /// Raw SQL with placeholders.
    pub sql: String,
    /// Parameter values in placeholder order.
    #[serde(default)]
    pub bindings: Vec<Binding>,
    /// Execution time in milliseconds.
    pub duration_ms: f64,
    /// Call stack, outermost frame first.
    #[serde(default)]
    pub call_stack: Vec<StackFrame>,
    /// Offset from the start of the capture session.
    #[serde(default)]
    pub captured_at: Duration,
}

impl QueryRecord {
    pub fn new(sql: impl Into<String>, duration_ms: f64) -> Self {
        Self {
            sql: sql.into(),
            bindings: Vec::new(),
            duration_ms,
            call_stack: Vec::new(),
            captured_at: Duration::ZERO,
        }
    }

    pub fn with_bindings(mut self, bindings: Vec<Binding>) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn with_call_stack(mut self, call_stack: Vec<StackFrame>) -> Self {
        self.call_stack = call_stack;
        self
    }

    pub fn with_captured_at(mut self, captured_at: Duration) -> Self {
        self.captured_at = captured_at;
        self
    }
}
