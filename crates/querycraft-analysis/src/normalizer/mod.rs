//! Query normalization: the two grouping keys detectors work with.
//!
//! - structural pattern: literal values erased, used for N+1 grouping
//! - content fingerprint: exact SQL + bindings digest, used for duplicates

pub mod fingerprint;
pub mod pattern;

pub use fingerprint::{fingerprint, QueryFingerprint};
pub use pattern::structural_pattern;
