#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use cabio::board::LedBoard;
use cabio::config::LedBoardConfig;
use cabio::constants::*;
use cabio::protocol::{Command, Decoded, Frame, IoBuf, Response, codec};
use cabio::test_support::{RecordingSink, host_request};
use cabio::BoardIndex;
use common::fixtures;

fn board(sink: Arc<RecordingSink>) -> LedBoard {
    LedBoard::new(BoardIndex::from(0), &LedBoardConfig::default(), sink)
}

/// Send one request and collect every reply frame it produced.
fn exchange(board: &mut LedBoard, command: Command) -> Vec<Response> {
    board.write(&host_request(command).unwrap()).unwrap();

    let mut src = IoBuf::from_slice(&board.read(usize::MAX));
    let mut dest = IoBuf::with_capacity(300);
    let mut out = Vec::new();
    while let Decoded::Accepted = codec::decode(&mut dest, &mut src).unwrap() {
        let frame = Frame::from_raw(dest.as_slice()).unwrap();
        out.push(Response::decode(&frame.payload).unwrap());
    }
    out
}

#[test]
fn every_defined_command_is_answered() {
    common::init_logging();
    let mut b = board(RecordingSink::new());

    let cases = vec![
        (Command::Reset { reset_type: RESET_TYPE_DEFAULT }, vec![]),
        (Command::SetTimeout { timeout: [0x13, 0x88] }, vec![0x13, 0x88]),
        (Command::SetDisableResponse { disable: 0 }, vec![0]),
        (Command::SetLed { rgb: vec![0x10, 0x20, 0x30] }, vec![]),
        (Command::GetBoardInfo, fixtures::default_board_info().encode().to_vec()),
        (Command::GetBoardStatus, vec![0, 0, 0, 0]),
        (Command::GetFirmwareChecksum, vec![0xAD, 0xF7]),
        (Command::GetProtocolVersion, vec![1, 1, 4]),
    ];

    for (cmd, data) in cases {
        let code = cmd.command_code();
        let replies = exchange(&mut b, cmd);
        assert_eq!(replies.len(), 1, "command {code:#04x}");
        let r = &replies[0];
        assert_eq!(r.status, RESP_STATUS_OK);
        assert_eq!(r.command, code);
        assert_eq!(r.report, RESP_REPORT_OK);
        assert_eq!(r.data, data, "command {code:#04x}");
    }
}

#[test]
fn wire_level_protocol_version_exchange() {
    let mut b = board(RecordingSink::new());
    b.write(&fixtures::wire(fixtures::PROTOCOL_VERSION_REQUEST)).unwrap();
    assert_eq!(
        b.read(usize::MAX),
        fixtures::wire(fixtures::PROTOCOL_VERSION_RESPONSE)
    );
}

#[test]
fn disable_response_silences_set_led_until_reenabled() {
    let sink = RecordingSink::new();
    let mut b = board(sink.clone());

    let ack = exchange(&mut b, Command::SetDisableResponse { disable: 1 });
    assert_eq!(ack[0].data, vec![1]);
    assert!(!b.responses_enabled());

    assert!(exchange(&mut b, Command::SetLed { rgb: vec![1, 2, 3] }).is_empty());
    // LEDs are still driven while replies are off
    assert_eq!(sink.frames().len(), 1);

    exchange(&mut b, Command::SetDisableResponse { disable: 0 });
    assert_eq!(exchange(&mut b, Command::SetLed { rgb: vec![4] }).len(), 1);

    exchange(&mut b, Command::SetDisableResponse { disable: 1 });
    let reset = exchange(&mut b, Command::Reset { reset_type: RESET_TYPE_DEFAULT });
    assert_eq!(reset.len(), 1);
    assert_eq!(exchange(&mut b, Command::SetLed { rgb: vec![5] }).len(), 1);
}

#[test]
fn queries_answer_while_responses_disabled() {
    let mut b = board(RecordingSink::new());
    exchange(&mut b, Command::SetDisableResponse { disable: 1 });
    assert_eq!(exchange(&mut b, Command::GetProtocolVersion).len(), 1);
}

#[test]
fn unknown_commands_are_ignored() {
    let mut b = board(RecordingSink::new());
    let replies = exchange(
        &mut b,
        Command::Unhandled {
            code: CMD_SET_LED_COUNT,
            args: vec![0x42],
        },
    );
    assert!(replies.is_empty());

    // the board keeps serving afterwards
    assert_eq!(exchange(&mut b, Command::GetBoardStatus).len(), 1);
}

#[test]
fn set_led_forwards_raw_payload() {
    let sink = RecordingSink::new();
    let mut b = board(sink.clone());
    b.write(&fixtures::wire(fixtures::SET_LED_ESCAPED_REQUEST)).unwrap();
    assert_eq!(
        sink.frames(),
        vec![(BoardIndex::from(0), vec![0xE0, 0xD0, 0x01])]
    );
}
