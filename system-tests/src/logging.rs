// system-tests/src/logging.rs
// ============================================================================
// Module: Logging
// Description: tracing subscriber setup for the harness and its binaries.
// Purpose: One stderr subscriber honoring RUST_LOG, installed at most once.
// Dependencies: tracing-subscriber
// ============================================================================

//! ## Overview
//! Installs a `fmt` subscriber filtered by `RUST_LOG` (default `warn`) that
//! writes to stderr. Safe to call from every test; later calls are no-ops.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset or invalid.
const DEFAULT_LEVEL: &str = "warn";

/// Installs the global subscriber if none is installed yet.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(DEFAULT_LEVEL))
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
