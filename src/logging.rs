//! Logging setup for test runs
//!
//! Library code only emits `tracing` events. Tests that want to see them
//! call [`init_test_logging`]; the filter comes from `RUST_LOG` and defaults
//! to `info`.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install a fmt subscriber writing through the test harness
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
