//! Process-wide tracing setup.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber: JSON lines, filtered by `RUST_LOG`
/// (default `info`).
///
/// Calling this more than once is fine; later calls leave the already
/// installed subscriber in place, so tests can call it freely.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .try_init();
}
