//! QueryCraft core: the query data model, configuration, errors, tracing
//! setup, shared constants, and the collaborator traits the analysis crate
//! is written against.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;
