//! Tracing setup for the `sleek` binary
//!
//! Filter directives come from `SLEEK_LOG` (EnvFilter syntax); events go to
//! stderr so report output on stdout stays clean.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "SLEEK_LOG";

const DEFAULT_FILTER: &str = "sleekfinance=warn";

static INIT: Once = Once::new();

/// Install the global subscriber; later calls are no-ops
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Another subscriber may already be installed by an embedding caller
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init();
    });
}
