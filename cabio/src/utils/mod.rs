//! Utilities for cabio: small, reusable helpers used across the crate.
//!
//! Hex helpers back the card ID file format and debug output; timeout
//! helpers centralize the handshake polling interval.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
