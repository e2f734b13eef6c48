//! Logging init: opt-in stderr subscriber for binaries and tests.
//!
//! The library itself only emits `tracing` events and never installs a
//! global subscriber on its own.

use tracing_subscriber::EnvFilter;

/// Initialize logging to stderr. Safe to call more than once; later calls
/// are no-ops if a subscriber is already installed.
pub fn init_logging_stderr() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,typesense=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
