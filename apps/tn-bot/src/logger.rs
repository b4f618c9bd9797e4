//! Log output.  Stdout carries the action lines, so every record goes to
//! stderr.  The libraries log through the `log` facade; the subscriber's
//! `tracing-log` bridge picks those records up.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the filter directives, e.g. `debug` or
/// `tn_planner=trace,warn`.
pub const LOG_ENV: &str = "TN_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Build the filter from `TN_LOG`.  Absent, blank or malformed directives
/// fall back to `warn`.
pub fn log_filter(value: Option<&str>) -> EnvFilter {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the stderr subscriber.  A second call is a no-op.
pub fn init() {
    let filter = log_filter(std::env::var(LOG_ENV).ok().as_deref());
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
