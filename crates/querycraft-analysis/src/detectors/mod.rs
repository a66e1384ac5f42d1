//! Detector system: four independent detectors over one query list.
//!
//! Each detector implements `Detector` and is a pure function of the
//! `DetectionContext`; none sees another's output.

pub mod duplicate_query;
pub mod grouping;
pub mod missing_index;
pub mod n_plus_one;
pub mod slow_query;
pub mod traits;

pub use duplicate_query::DuplicateQueryDetector;
pub use missing_index::MissingIndexDetector;
pub use n_plus_one::N1Detector;
pub use slow_query::SlowQueryDetector;
pub use traits::{DetectionContext, Detector};
