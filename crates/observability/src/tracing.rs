//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the process: JSON lines, `RUST_LOG`-filtered,
/// `info` by default.
///
/// Safe to call multiple times (subsequent calls are no-ops), including from
/// tests that want posting/report logs visible.
pub fn init() {
    init_with_default("info");
}

/// Same as [`init`] but with an explicit fallback filter for when `RUST_LOG`
/// is unset.
pub fn init_with_default(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
