//! Tracing setup for spec runs.

use std::sync::Once;

static INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Filter defaults to `info` and is overridable through `RUST_LOG`. Safe to
/// call from every spec; only the first call installs anything.
pub fn init() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
