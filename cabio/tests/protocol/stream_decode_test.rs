#[path = "../common/mod.rs"]
mod common;

use cabio::protocol::{Decoded, Frame, IoBuf, codec};
use cabio::Error;
use common::fixtures;

fn stream(parts: &[&[u8]]) -> IoBuf {
    let bytes: Vec<u8> = parts.concat();
    IoBuf::from_slice(&bytes)
}

#[test]
fn garbage_before_sync_is_dropped() {
    common::init_logging();
    let valid = fixtures::wire(fixtures::PROTOCOL_VERSION_REQUEST);
    let mut src = stream(&[&[0x00, 0x13, 0x37, 0xFF], &valid]);
    let mut dest = IoBuf::with_capacity(300);

    assert_eq!(codec::decode(&mut dest, &mut src).unwrap(), Decoded::Accepted);
    assert_eq!(
        Frame::from_raw(dest.as_slice()).unwrap(),
        Frame::decode(&valid).unwrap()
    );
    assert!(src.is_empty());
    assert_eq!(codec::decode(&mut dest, &mut src).unwrap(), Decoded::Incomplete);
}

#[test]
fn interrupting_sync_drops_its_frame() {
    let lost = fixtures::wire(fixtures::FW_SUM_REQUEST);
    let valid = fixtures::wire(fixtures::PROTOCOL_VERSION_REQUEST);
    let mut src = stream(&[&[0xE0, 0x02, 0x01], &lost, &valid]);
    let mut dest = IoBuf::with_capacity(300);

    assert!(matches!(
        codec::decode(&mut dest, &mut src),
        Err(Error::FrameFormat(_))
    ));
    assert_eq!(src.as_slice(), [&lost[1..], &valid[..]].concat().as_slice());

    assert_eq!(codec::decode(&mut dest, &mut src).unwrap(), Decoded::Accepted);
    assert_eq!(Frame::from_raw(dest.as_slice()).unwrap().payload, vec![0xF3]);
    assert!(src.is_empty());
}

#[test]
fn partial_frame_waits_for_more() {
    let valid = fixtures::wire(fixtures::RESET_REQUEST);
    let mut src = IoBuf::with_capacity(64);
    src.extend(&valid[..4]).unwrap();
    let mut dest = IoBuf::with_capacity(300);

    assert_eq!(codec::decode(&mut dest, &mut src).unwrap(), Decoded::Incomplete);
    assert_eq!(src.len(), 4);

    src.extend(&valid[4..]).unwrap();
    assert_eq!(codec::decode(&mut dest, &mut src).unwrap(), Decoded::Accepted);
}

#[test]
fn doubled_escape_is_framing_error() {
    let mut src = stream(&[&[0xE0, 0x02, 0x01, 0x02, 0xD0, 0xD0, 0x00]]);
    let mut dest = IoBuf::with_capacity(300);
    let err = codec::decode(&mut dest, &mut src).unwrap_err();
    assert!(matches!(err, Error::FrameFormat(_)));
    assert!(!err.is_crc());
}
