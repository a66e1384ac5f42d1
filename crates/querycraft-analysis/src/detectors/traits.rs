//! The `Detector` trait and the context every detector reads.

use querycraft_core::types::{DetectorKind, Issue, QueryRecord};

use crate::location::SourceLocationResolver;
use crate::suggestions::SqlHints;

/// Everything a detector may read. Borrowed, never mutated.
pub struct DetectionContext<'a> {
    pub queries: &'a [QueryRecord],
    pub resolver: &'a SourceLocationResolver,
    pub hints: &'a dyn SqlHints,
}

impl<'a> DetectionContext<'a> {
    pub fn new(
        queries: &'a [QueryRecord],
        resolver: &'a SourceLocationResolver,
        hints: &'a dyn SqlHints,
    ) -> Self {
        Self {
            queries,
            resolver,
            hints,
        }
    }
}

pub trait Detector: Send + Sync {
    fn kind(&self) -> DetectorKind;

    /// Issues in emission order. Ordering across detectors is the
    /// aggregator's job.
    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Issue>;
}
