//! Logging setup on top of `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,spangrid_ui=debug";

/// Install the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over [`DEFAULT_FILTER`]. Panics if a global
/// subscriber is already installed.
pub fn init() {
    tracing_subscriber::fmt().with_env_filter(env_filter(DEFAULT_FILTER)).init();
}

/// Install the global fmt subscriber with custom filter directives.
///
/// Returns `false` if a subscriber was already installed, which makes this
/// safe to call from every test.
pub fn init_with_filter(directives: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives))
        .with_test_writer()
        .try_init()
        .is_ok()
}

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}
