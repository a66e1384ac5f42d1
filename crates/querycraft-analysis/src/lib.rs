//! QueryCraft analysis: turns the queries executed while serving one request
//! into typed performance issues and a weighted score.
//!
//! Flow: `normalizer` keys → `detectors` → `aggregation` (merge + severity
//! sort) → `scoring` → `pipeline::DiagnosticsReport`.

pub mod aggregation;
pub mod capture;
pub mod detectors;
pub mod location;
pub mod normalizer;
pub mod pipeline;
pub mod scoring;
pub mod suggestions;

pub use pipeline::{DiagnosticsPipeline, DiagnosticsReport};
