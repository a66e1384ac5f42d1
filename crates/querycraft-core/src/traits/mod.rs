//! Seams to collaborators outside the diagnostics core.

pub mod query_planner;

pub use query_planner::{QueryPlan, QueryPlanner, UnavailablePlanner};
