// cabio/src/board/mod.rs

//! Emulated LED controller boards, one per virtual COM port.

pub mod dispatch;
pub mod led_board;
pub mod sink;
pub mod uart;

use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info};

pub use dispatch::{BoardIdentity, BoardState};
pub use led_board::LedBoard;
pub use sink::{LedSink, NullSink};
pub use uart::Uart;

use crate::config::LedBoardConfig;
use crate::types::BoardIndex;
use crate::{Error, Result};

/// All emulated boards. Each board has its own lock so traffic on one port
/// never waits on another.
pub struct LedBoards {
    boards: Vec<Mutex<LedBoard>>,
    first_port: u32,
}

impl LedBoards {
    pub fn new(config: &LedBoardConfig, sink: Arc<dyn LedSink>) -> Result<Self> {
        config.validate()?;

        let boards = (0..config.num_boards)
            .map(|i| Mutex::new(LedBoard::new(BoardIndex::from(i), config, Arc::clone(&sink))))
            .collect();
        info!(
            "LED boards: {} board(s) on COM{}..",
            config.num_boards, config.first_port
        );

        Ok(Self {
            boards,
            first_port: config.first_port,
        })
    }

    /// `Ok(None)` when the boards are disabled in the configuration.
    pub fn from_config(config: &LedBoardConfig, sink: Arc<dyn LedSink>) -> Result<Option<Self>> {
        if !config.enable {
            debug!("LED boards disabled");
            return Ok(None);
        }
        Self::new(config, sink).map(Some)
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Board attached to COM port `port`, if any.
    pub fn board_for_port(&self, port: u32) -> Option<BoardIndex> {
        let i = port.checked_sub(self.first_port)? as usize;
        (i < self.boards.len()).then(|| BoardIndex::from(i))
    }

    fn lock(&self, board: BoardIndex) -> Result<MutexGuard<'_, LedBoard>> {
        let slot = self
            .boards
            .get(board.get())
            .ok_or(Error::DeviceNotFound)?;
        Ok(slot.lock().unwrap_or_else(|p| p.into_inner()))
    }

    /// Run `f` with exclusive access to one board.
    pub fn with_board<T>(&self, board: BoardIndex, f: impl FnOnce(&mut LedBoard) -> T) -> Result<T> {
        let mut guard = self.lock(board)?;
        Ok(f(&mut guard))
    }

    pub fn open(&self, board: BoardIndex) -> Result<()> {
        self.lock(board)?.open()
    }

    pub fn write(&self, board: BoardIndex, data: &[u8]) -> Result<usize> {
        self.lock(board)?.write(data)
    }

    pub fn read(&self, board: BoardIndex, max: usize) -> Result<Vec<u8>> {
        Ok(self.lock(board)?.read(max))
    }
}
