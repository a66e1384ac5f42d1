//! Property-based tests for normalization, detection, and scoring.

mod normalizer_properties;
mod pipeline_properties;
mod scoring_properties;
