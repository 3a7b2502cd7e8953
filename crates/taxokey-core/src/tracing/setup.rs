//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize the taxokey tracing/logging system.
///
/// Reads the `TAXOKEY_LOG` environment variable for per-crate log levels.
/// Format: `TAXOKEY_LOG=taxokey_engine=debug,taxokey_core=warn`
///
/// Falls back to `taxokey=info` if `TAXOKEY_LOG` is not set or is invalid.
///
/// Idempotent. If another global subscriber is already installed this is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
