//! Logging infrastructure.
//!
//! Centralized tracing setup shared by every binary in the workspace.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging with sensible defaults
///
/// Environment-based filtering via RUST_LOG, compact format, default
/// level WARN so engine output stays clean for interactive use.
pub fn init() {
    init_with_level("warn")
}

/// Initialize logging with a specific default level
///
/// The default can still be overridden by the RUST_LOG environment
/// variable.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}
