//! Logging setup built on `tracing-subscriber`.
//!
//! Library crates only emit `tracing` events; binaries and examples call
//! [`init`] once at startup.

use tracing_subscriber::EnvFilter;

/// Default directive used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,flyplot_scene=debug,flyplot_chart=debug";

/// Install the global fmt subscriber with the default filter.
///
/// `RUST_LOG` takes precedence over [`DEFAULT_FILTER`] when present.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Install the global fmt subscriber with an explicit filter directive.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_with_filter(directives: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .try_init()
        .is_ok()
}
