//! Shared setup for integration tests.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Send `shapeq` tracing to the test writer.
///
/// Only installs a subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=shapeq=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_test_writer().with_target(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
