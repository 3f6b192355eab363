// cabio/src/board/uart.rs

use crate::Result;
use crate::constants::UART_QUEUE_LEN;
use crate::protocol::IoBuf;

/// Virtual serial port: bytes the game wrote and bytes waiting for the game
/// to read.
#[derive(Debug, Clone)]
pub struct Uart {
    port: u32,
    pub(crate) written: IoBuf,
    pub(crate) readable: IoBuf,
}

impl Uart {
    pub fn new(port: u32) -> Self {
        Self {
            port,
            written: IoBuf::with_capacity(UART_QUEUE_LEN),
            readable: IoBuf::with_capacity(UART_QUEUE_LEN),
        }
    }

    pub fn port(&self) -> u32 {
        self.port
    }

    /// Queue bytes written by the game. All or nothing.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.written.extend(data)?;
        Ok(data.len())
    }

    /// Hand up to `max` pending response bytes to the game.
    pub fn read(&mut self, max: usize) -> Vec<u8> {
        self.readable.take(max)
    }

    pub fn pending_written(&self) -> usize {
        self.written.len()
    }

    pub fn pending_readable(&self) -> usize {
        self.readable.len()
    }
}
