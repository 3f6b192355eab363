//! Timeout helpers used across the crate.
//!
//! Nothing in a poll path waits; the only sleeping happens while a worker
//! thread is being brought up.

use std::time::Duration;

/// Interval between readiness checks while a worker thread starts up.
pub const HANDSHAKE_POLL_INTERVAL_MS: u64 = 25;

/// Upper bound on how long startup waits for a worker to report ready.
pub const HANDSHAKE_TIMEOUT_MS: u64 = 5000;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Handshake polling interval as Duration.
pub fn handshake_interval() -> Duration {
    ms(HANDSHAKE_POLL_INTERVAL_MS)
}
