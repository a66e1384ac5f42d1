//! Data model shared by the capture session, detectors, and scorer.

pub mod collections;
pub mod issue;
pub mod query;

pub use collections::FxHashMap;
pub use issue::{DetectorKind, Issue, IssueKind, Severity, SourceLocation};
pub use query::{Binding, QueryRecord, StackFrame};
