//! Error handling for QueryCraft.
//! One error enum per subsystem, `thiserror` only.

pub mod capture_error;
pub mod config_error;
pub mod error_code;
pub mod plan_error;

pub use capture_error::CaptureError;
pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use plan_error::PlanError;
