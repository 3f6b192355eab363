// cabio/src/protocol/commands.rs

use crate::constants::*;
use crate::protocol::frame::Frame;
use crate::{Error, Result};

/// Requests the host sends to an LED board. The payload of a request frame
/// is `[command, args..]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reset { reset_type: u8 },
    SetTimeout { timeout: [u8; 2] },
    SetDisableResponse { disable: u8 },
    SetLed { rgb: Vec<u8> },
    GetBoardInfo,
    GetBoardStatus,
    GetFirmwareChecksum,
    GetProtocolVersion,
    /// Valid frame carrying a command the board does not implement
    Unhandled { code: u8, args: Vec<u8> },
}

impl Command {
    pub fn command_code(&self) -> u8 {
        match self {
            Command::Reset { .. } => CMD_RESET,
            Command::SetTimeout { .. } => CMD_SET_TIMEOUT,
            Command::SetDisableResponse { .. } => CMD_SET_DISABLE_RESPONSE,
            Command::SetLed { .. } => CMD_SET_LED,
            Command::GetBoardInfo => CMD_BOARD_INFO,
            Command::GetBoardStatus => CMD_BOARD_STATUS,
            Command::GetFirmwareChecksum => CMD_FW_SUM,
            Command::GetProtocolVersion => CMD_PROTOCOL_VER,
            Command::Unhandled { code, .. } => *code,
        }
    }

    /// Encode as a request payload (command byte first).
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![self.command_code()];
        match self {
            Command::Reset { reset_type } => out.push(*reset_type),
            Command::SetTimeout { timeout } => out.extend_from_slice(timeout),
            Command::SetDisableResponse { disable } => out.push(*disable),
            Command::SetLed { rgb } => out.extend_from_slice(rgb),
            Command::Unhandled { args, .. } => out.extend_from_slice(args),
            Command::GetBoardInfo
            | Command::GetBoardStatus
            | Command::GetFirmwareChecksum
            | Command::GetProtocolVersion => {}
        }
        out
    }

    /// Decode a request payload. Argument bytes the host left out read as
    /// zero, the way the board sees its zero-filled request buffer.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        let (&code, args) = payload.split_first().ok_or(Error::InvalidLength {
            expected: 1,
            actual: 0,
        })?;
        if args.len() > MAX_REQUEST_ARGS {
            return Err(Error::InvalidLength {
                expected: MAX_REQUEST_ARGS,
                actual: args.len(),
            });
        }
        let arg = |i: usize| args.get(i).copied().unwrap_or(0);

        let cmd = match code {
            CMD_RESET => Command::Reset { reset_type: arg(0) },
            CMD_SET_TIMEOUT => Command::SetTimeout {
                timeout: [arg(0), arg(1)],
            },
            CMD_SET_DISABLE_RESPONSE => Command::SetDisableResponse { disable: arg(0) },
            CMD_SET_LED => Command::SetLed { rgb: args.to_vec() },
            CMD_BOARD_INFO => Command::GetBoardInfo,
            CMD_BOARD_STATUS => Command::GetBoardStatus,
            CMD_FW_SUM => Command::GetFirmwareChecksum,
            CMD_PROTOCOL_VER => Command::GetProtocolVersion,
            other => Command::Unhandled {
                code: other,
                args: args.to_vec(),
            },
        };
        Ok(cmd)
    }
}

/// Addressed request as received from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub dest_addr: u8,
    pub src_addr: u8,
    pub command: Command,
}

impl Request {
    pub fn new(dest_addr: u8, src_addr: u8, command: Command) -> Self {
        Self {
            dest_addr,
            src_addr,
            command,
        }
    }

    pub fn from_frame(frame: &Frame) -> Result<Self> {
        Ok(Self {
            dest_addr: frame.dest_addr,
            src_addr: frame.src_addr,
            command: Command::decode(&frame.payload)?,
        })
    }

    pub fn to_frame(&self) -> Frame {
        Frame::new(self.dest_addr, self.src_addr, self.command.encode())
    }
}
