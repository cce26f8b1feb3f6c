//! `commkit_log` v1:
//! Process-level `tracing` subscriber setup for hosts of the report pipeline.

use tracing_subscriber::{EnvFilter, fmt};

/// Install a fmt subscriber filtered by `RUST_LOG`, or `level_default` when unset.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_logging(level_default: &str) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_default));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
