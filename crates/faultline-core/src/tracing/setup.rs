//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "FAULTLINE_LOG";

/// Filter used when `FAULTLINE_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "faultline=info";

/// Initialize the Faultline tracing/logging system.
///
/// Reads `FAULTLINE_LOG` for per-module log levels, e.g.
/// `FAULTLINE_LOG=faultline_analysis::layering=debug,faultline_analysis::propagation=trace`.
///
/// Falls back to `faultline=info` if `FAULTLINE_LOG` is not set or is invalid.
/// Safe to call more than once; only the first call installs the subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // A host application may already own the global subscriber.
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
