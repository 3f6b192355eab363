// cabio/src/lib.rs

//! cabio
//!
//! Arcade cabinet I/O emulation: LED controller boards spoken to over a
//! virtual serial link, and card readers backed by ID files or HID
//! hardware.

pub mod board;
pub mod card;
pub mod config;
pub mod constants;
pub mod error;
pub mod hid;
pub mod prelude;
pub mod protocol;
pub mod test_support;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
