// Shared helpers for the integration test crates in `tests/`.
#![allow(dead_code)]

pub mod fixtures;

use std::sync::Once;

static LOGGING: Once = Once::new();

/// Route `log` output through env_logger; `RUST_LOG=debug cargo test` shows it.
pub fn init_logging() {
    LOGGING.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}
