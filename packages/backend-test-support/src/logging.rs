//! Tracing setup for integration test binaries.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Installs a test-writer subscriber once per process.
///
/// Filter precedence: `TEST_LOG`, then `RUST_LOG`, then `warn`.
pub fn init() {
    init_with_default("warn");
}

/// Like [`init`] but with a caller-chosen fallback filter, e.g.
/// `"spyroom=debug"` while chasing a flaky test.
pub fn init_with_default(default_filter: &str) {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
