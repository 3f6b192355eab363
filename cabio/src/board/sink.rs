// cabio/src/board/sink.rs

use crate::Result;
use crate::types::BoardIndex;

/// Receiver of LED colour data. How frames reach the physical lights
/// (named pipe, serial port, nothing) is up to the implementation.
pub trait LedSink: Send + Sync {
    /// Called when the game opens the board's port.
    fn init(&self, _board: BoardIndex) -> Result<()> {
        Ok(())
    }

    /// Raw RGB payload of a set-led request.
    fn set_leds(&self, board: BoardIndex, rgb: &[u8]);
}

impl<F> LedSink for F
where
    F: Fn(BoardIndex, &[u8]) + Send + Sync,
{
    fn set_leds(&self, board: BoardIndex, rgb: &[u8]) {
        self(board, rgb)
    }
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LedSink for NullSink {
    fn set_leds(&self, _board: BoardIndex, _rgb: &[u8]) {}
}
