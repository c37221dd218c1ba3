//! Test logging shared by unit and integration tests.

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_TEST_FILTER: &str = "warn";

static SUBSCRIBER: Lazy<()> = Lazy::new(|| {
    let directives = ["TEST_LOG", "RUST_LOG"]
        .iter()
        .find_map(|key| std::env::var(key).ok())
        .unwrap_or_else(|| DEFAULT_TEST_FILTER.to_string());

    // Another harness may have installed a global subscriber first.
    let _ = fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_test_writer()
        .without_time()
        .with_target(false)
        .try_init();
});

/// Install the test subscriber once per process.
///
/// The filter comes from `TEST_LOG`, then `RUST_LOG`, and defaults to `warn`.
pub fn init() {
    Lazy::force(&SUBSCRIBER);
}
