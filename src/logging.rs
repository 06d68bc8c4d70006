//! Diagnostic logging setup
//!
//! Diagnostics go to stderr through `tracing`, filtered by `ATLAS_LOG`
//! (default `warn`). The domain audit trail lives in [`crate::audit`].

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the filter directives
pub const LOG_ENV: &str = "ATLAS_LOG";

/// Filter used when `ATLAS_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "warn";

/// Build the filter from the environment
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
