//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, or by `default_directive`
/// when `RUST_LOG` is unset. Returns `false` if a global subscriber was
/// already installed.
pub fn init_tracing(default_directive: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Same as [`init_tracing`] with JSON-formatted output, for log shipping.
pub fn init_json_tracing(default_directive: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
