//! Diagnostic tracing for the reassignment tool.
//!
//! Tracing output goes to stderr and is controlled by `RUST_LOG`. Per-page
//! result lines on stdout and the artifacts in the temp directory are
//! product output and do not depend on it.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset.
///
/// # Example
/// ```bash
/// RUST_LOG=reassign=debug reassign 1a2b3c
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
