// cabio/src/protocol/responses.rs

use crate::constants::{CMD_BOARD_INFO, RESP_REPORT_OK, RESP_STATUS_OK};
use crate::protocol::frame::Frame;
use crate::{Error, Result};

/// Board reply. The payload of a response frame is
/// `[status, command, report, data..]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u8,
    pub command: u8,
    pub report: u8,
    pub data: Vec<u8>,
}

impl Response {
    /// Successful reply to `command` without data.
    pub fn ack(command: u8) -> Self {
        Self {
            status: RESP_STATUS_OK,
            command,
            report: RESP_REPORT_OK,
            data: Vec::new(),
        }
    }

    pub fn with_data(command: u8, data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
            ..Self::ack(command)
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(3 + self.data.len());
        out.push(self.status);
        out.push(self.command);
        out.push(self.report);
        out.extend_from_slice(&self.data);
        out
    }

    pub fn decode(payload: &[u8]) -> Result<Self> {
        if payload.len() < 3 {
            return Err(Error::InvalidLength {
                expected: 3,
                actual: payload.len(),
            });
        }
        Ok(Self {
            status: payload[0],
            command: payload[1],
            report: payload[2],
            data: payload[3..].to_vec(),
        })
    }

    /// Address the reply from the board to the host.
    pub fn to_frame(&self, host_addr: u8, board_addr: u8) -> Frame {
        Frame::new(host_addr, board_addr, self.encode())
    }
}

/// Board identification block returned by the board-info command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardInfo {
    pub board_number: [u8; 8],
    pub chip_number: [u8; 5],
    pub fw_ver: u8,
}

impl BoardInfo {
    pub const ENCODED_LEN: usize = 16;

    /// `board_number(8) 0x0A chip_number(5) 0xFF fw_ver`
    pub fn encode(&self) -> [u8; Self::ENCODED_LEN] {
        let mut out = [0u8; Self::ENCODED_LEN];
        out[..8].copy_from_slice(&self.board_number);
        out[8] = 0x0A;
        out[9..14].copy_from_slice(&self.chip_number);
        out[14] = 0xFF;
        out[15] = self.fw_ver;
        out
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < Self::ENCODED_LEN {
            return Err(Error::InvalidLength {
                expected: Self::ENCODED_LEN,
                actual: data.len(),
            });
        }
        let mut board_number = [0u8; 8];
        board_number.copy_from_slice(&data[..8]);
        let mut chip_number = [0u8; 5];
        chip_number.copy_from_slice(&data[9..14]);
        Ok(Self {
            board_number,
            chip_number,
            fw_ver: data[15],
        })
    }

    pub fn to_response(&self) -> Response {
        Response::with_data(CMD_BOARD_INFO, &self.encode())
    }
}
