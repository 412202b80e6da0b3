//! Logging setup
//!
//! Installs a `tracing_subscriber::fmt` subscriber filtered by `RUST_LOG`,
//! falling back to `info` when the variable is unset or invalid.

use tracing_subscriber::EnvFilter;

/// Default filter directive
pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber
///
/// Returns false if a subscriber was already installed; calling this more
/// than once is harmless.
pub fn init() -> bool {
    init_with(DEFAULT_FILTER)
}

/// Install the global subscriber with a fallback directive of `default`
pub fn init_with(default: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Install a subscriber that writes through the test harness' capture
#[cfg(test)]
pub(crate) fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
