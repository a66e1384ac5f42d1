//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the QueryCraft tracing/logging system.
///
/// Reads `QUERYCRAFT_LOG` for per-module log levels, e.g.
/// `QUERYCRAFT_LOG=querycraft_analysis::detectors=debug`.
/// Falls back to `querycraft=info` if unset or invalid.
///
/// Idempotent; later calls are no-ops. If the host application already
/// installed a global subscriber, that subscriber is kept.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("querycraft=info"));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
