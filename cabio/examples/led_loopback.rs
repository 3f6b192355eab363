// LED board loopback example
//
// Plays the game side of the serial link: sends the startup query sequence
// a game issues to its LED boards, then one set-led frame, and prints every
// reply frame the emulated board sends back.
//
// Run with `RUST_LOG=debug` to see the board's own log output.

use std::sync::Arc;

use cabio::prelude::*;
use cabio::protocol::{Decoded, IoBuf, codec};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let sink: Arc<dyn LedSink> = Arc::new(|board: BoardIndex, rgb: &[u8]| {
        println!("board {board}: {} LED bytes", rgb.len());
    });
    let boards = LedBoards::from_config(&LedBoardConfig::default(), sink)?
        .ok_or_else(|| anyhow::anyhow!("LED boards are disabled"))?;

    let board = boards
        .board_for_port(10)
        .ok_or_else(|| anyhow::anyhow!("no board on COM10"))?;
    boards.open(board)?;

    let startup = [
        Command::Reset { reset_type: 0xD9 },
        Command::GetBoardInfo,
        Command::GetFirmwareChecksum,
        Command::GetProtocolVersion,
        Command::SetTimeout { timeout: [0x13, 0x88] },
        Command::SetLed { rgb: vec![0xFF; 198] },
    ];

    for command in startup {
        let wire = Request::new(2, 1, command).to_frame().encode()?;
        println!("-> {}", hex::encode(&wire));
        boards.write(board, &wire)?;

        let mut src = IoBuf::from_slice(&boards.read(board, usize::MAX)?);
        let mut dest = IoBuf::with_capacity(300);
        while let Decoded::Accepted = codec::decode(&mut dest, &mut src)? {
            let frame = Frame::from_raw(dest.as_slice())?;
            let response = Response::decode(&frame.payload)?;
            println!(
                "<- cmd {:#04x} data [{}]",
                response.command,
                bytes_to_hex_spaced_upper(&response.data)
            );
        }
    }

    Ok(())
}
