//! Tracing initialization and configuration.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::DEFAULT_LOG_FILTER;

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Initialize the Cadence tracing/logging system.
///
/// Reads the `CADENCE_LOG` environment variable for per-module log levels.
/// Format: `CADENCE_LOG=cadence_analysis=debug,cadence_core=warn`
///
/// Falls back to `cadence=info` if `CADENCE_LOG` is not set or is invalid.
///
/// Returns whether the Cadence subscriber is the global one. A host process
/// that installed its own subscriber first keeps it: the failed install is
/// reported once on stderr and every call returns `false`. Idempotent.
pub fn init_tracing() -> bool {
    *INSTALLED.get_or_init(|| {
        let filter = EnvFilter::try_from_env("CADENCE_LOG")
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
        match installed {
            Ok(()) => true,
            Err(err) => {
                eprintln!("cadence: tracing not installed, keeping the existing subscriber: {err}");
                false
            }
        }
    })
}
