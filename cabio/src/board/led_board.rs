// cabio/src/board/led_board.rs

use std::sync::Arc;

use log::{debug, error, warn};

use crate::board::dispatch::{self, BoardIdentity, BoardState, DispatchContext};
use crate::board::sink::LedSink;
use crate::board::uart::Uart;
use crate::config::LedBoardConfig;
use crate::constants::MAX_REQUEST_FRAME_LEN;
use crate::protocol::{BoardInfo, Decoded, Frame, IoBuf, Request, codec};
use crate::types::BoardIndex;
use crate::Result;

/// One emulated LED controller board behind a virtual UART.
pub struct LedBoard {
    index: BoardIndex,
    identity: BoardIdentity,
    board_addr: u8,
    host_addr: u8,
    state: BoardState,
    uart: Uart,
    sink: Arc<dyn LedSink>,
}

impl LedBoard {
    pub fn new(index: BoardIndex, config: &LedBoardConfig, sink: Arc<dyn LedSink>) -> Self {
        let identity = BoardIdentity {
            info: BoardInfo {
                board_number: config.board_number_bytes(),
                chip_number: config.chip_number_bytes(),
                fw_ver: config.fw_ver,
            },
            fw_sum: config.fw_sum,
        };
        let port = config.first_port + index.get() as u32;

        Self {
            index,
            identity,
            board_addr: config.board_addr,
            host_addr: config.host_addr,
            state: BoardState::default(),
            uart: Uart::new(port),
            sink,
        }
    }

    pub fn index(&self) -> BoardIndex {
        self.index
    }

    pub fn port(&self) -> u32 {
        self.uart.port()
    }

    pub fn responses_enabled(&self) -> bool {
        self.state.enable_response
    }

    /// The game opened the port: bring up the rendering backend.
    pub fn open(&mut self) -> Result<()> {
        debug!("LED board {}: starting output backend", self.index);
        self.sink.init(self.index).inspect_err(|e| {
            error!("LED board {}: output backend error: {}", self.index, e);
        })
    }

    /// Accept bytes written by the game and serve every complete request.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        let n = self.uart.write(data)?;
        self.process()?;
        Ok(n)
    }

    /// Pending reply bytes for the game, at most `max`.
    pub fn read(&mut self, max: usize) -> Vec<u8> {
        self.uart.read(max)
    }

    pub fn pending_readable(&self) -> usize {
        self.uart.pending_readable()
    }

    /// Decode and dispatch frames until the written queue runs dry.
    /// Returns how many frames were accepted.
    pub fn process(&mut self) -> Result<usize> {
        let mut request = IoBuf::with_capacity(MAX_REQUEST_FRAME_LEN);
        let mut handled = 0;

        loop {
            match codec::decode(&mut request, &mut self.uart.written) {
                Ok(Decoded::Incomplete) => return Ok(handled),
                Ok(Decoded::Accepted) => {
                    handled += 1;
                    if let Err(e) = self.handle_frame(request.as_slice()) {
                        warn!("LED board {}: processing error: {}", self.index, e);
                    }
                }
                Err(e) if e.is_transient() => {
                    warn!("LED board {}: deframe error: {}", self.index, e);
                }
                Err(e) => {
                    error!("LED board {}: deframe error: {}", self.index, e);
                    return Err(e);
                }
            }
        }
    }

    fn handle_frame(&mut self, raw: &[u8]) -> Result<()> {
        let request = Request::from_frame(&Frame::from_raw(raw)?)?;

        let ctx = DispatchContext {
            board: self.index,
            identity: &self.identity,
            state: &mut self.state,
            sink: self.sink.as_ref(),
        };
        let Some(response) = dispatch::dispatch(ctx, &request.command) else {
            return Ok(());
        };

        let reply = response.to_frame(self.host_addr, self.board_addr).to_raw()?;
        codec::encode(&mut self.uart.readable, &reply)
    }
}
