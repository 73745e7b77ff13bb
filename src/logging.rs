//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

/// Install a compact `fmt` subscriber.
///
/// Respects `RUST_LOG`, defaults to `info`. Safe to call more than once;
/// later calls are ignored.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init();
}
