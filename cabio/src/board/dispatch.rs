// cabio/src/board/dispatch.rs

//! Command handlers. Each handler sees only the board state it needs and
//! returns the reply to queue, if any.

use log::{debug, info, warn};

use crate::board::sink::LedSink;
use crate::constants::*;
use crate::protocol::{BoardInfo, Command, Response};
use crate::types::BoardIndex;

/// Identity fields a board reports about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardIdentity {
    pub info: BoardInfo,
    pub fw_sum: u16,
}

/// Mutable per-board protocol state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    pub enable_response: bool,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            enable_response: true,
        }
    }
}

/// Everything a handler may touch while serving one request.
pub struct DispatchContext<'a> {
    pub board: BoardIndex,
    pub identity: &'a BoardIdentity,
    pub state: &'a mut BoardState,
    pub sink: &'a dyn LedSink,
}

/// Run one request against the board. `None` means nothing is sent back.
pub fn dispatch(ctx: DispatchContext<'_>, command: &Command) -> Option<Response> {
    match command {
        Command::Reset { reset_type } => Some(reset(ctx.board, ctx.state, *reset_type)),
        Command::GetBoardInfo => Some(board_info(ctx.board, ctx.identity)),
        Command::GetFirmwareChecksum => Some(firmware_checksum(ctx.board, ctx.identity)),
        Command::GetProtocolVersion => Some(protocol_version(ctx.board)),
        Command::GetBoardStatus => Some(board_status(ctx.board)),
        Command::SetLed { rgb } => set_led(ctx.board, ctx.state, ctx.sink, rgb),
        Command::SetDisableResponse { disable } => {
            Some(set_disable_response(ctx.board, ctx.state, *disable))
        }
        Command::SetTimeout { timeout } => Some(set_timeout(ctx.board, *timeout)),
        Command::Unhandled { code, .. } => {
            warn!("LED board {}: unhandled command {:#04x}", ctx.board, code);
            None
        }
    }
}

fn reset(board: BoardIndex, state: &mut BoardState, reset_type: u8) -> Response {
    info!("LED board {}: reset (type {:#04x})", board, reset_type);
    if reset_type != RESET_TYPE_DEFAULT {
        warn!("LED board {}: unknown reset type {:#04x}", board, reset_type);
    }

    state.enable_response = true;
    Response::ack(CMD_RESET)
}

fn board_info(board: BoardIndex, identity: &BoardIdentity) -> Response {
    debug!("LED board {}: get board info", board);
    identity.info.to_response()
}

fn firmware_checksum(board: BoardIndex, identity: &BoardIdentity) -> Response {
    debug!("LED board {}: get firmware checksum", board);
    Response::with_data(CMD_FW_SUM, &identity.fw_sum.to_be_bytes())
}

fn protocol_version(board: BoardIndex) -> Response {
    debug!("LED board {}: get protocol version", board);
    Response::with_data(CMD_PROTOCOL_VER, &PROTOCOL_VERSION)
}

fn board_status(board: BoardIndex) -> Response {
    debug!("LED board {}: get board status", board);
    Response::with_data(CMD_BOARD_STATUS, &[0, 0, 0, 0])
}

fn set_led(
    board: BoardIndex,
    state: &BoardState,
    sink: &dyn LedSink,
    rgb: &[u8],
) -> Option<Response> {
    sink.set_leds(board, rgb);

    state
        .enable_response
        .then(|| Response::ack(CMD_SET_LED))
}

fn set_disable_response(board: BoardIndex, state: &mut BoardState, disable: u8) -> Response {
    info!(
        "LED board {}: {} responses",
        board,
        if disable != 0 { "disable" } else { "enable" }
    );

    state.enable_response = disable == 0;
    // this reply goes out even when it just switched replies off
    Response::with_data(CMD_SET_DISABLE_RESPONSE, &[disable])
}

fn set_timeout(board: BoardIndex, timeout: [u8; 2]) -> Response {
    // accepted but never enforced
    debug!("LED board {}: set timeout {:02x?}", board, timeout);
    Response::with_data(CMD_SET_TIMEOUT, &timeout)
}
