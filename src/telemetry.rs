// ABOUTME: Tracing subscriber setup for embedders that do not install their
// ABOUTME: own; filters via RUST_LOG with a warn default.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install a compact fmt subscriber.
///
/// Returns `false` if a global subscriber was already set.
pub fn init_tracing() -> bool {
    init_tracing_with_default(LevelFilter::WARN)
}

/// Like [`init_tracing`] with a different default level.
pub fn init_tracing_with_default(default: LevelFilter) -> bool {
    let env_filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}
