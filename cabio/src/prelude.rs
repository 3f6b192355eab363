// cabio/src/prelude.rs

pub use crate::board::{LedBoard, LedBoards, LedSink, NullSink};
pub use crate::card::{CardReader, FixedKey, KeyState};
pub use crate::config::{AimeConfig, LedBoardConfig};
pub use crate::hid::{HidBackend, HidDevice, HidRegistry, Multiplexer, PollResult};
pub use crate::protocol::{Command, Frame, Request, Response};
pub use crate::{AimeId, BoardIndex, CardType, Error, FelicaId, Result, UnitNo};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced_upper, ms, parse_hex_pairs};
