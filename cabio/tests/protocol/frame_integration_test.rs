#[path = "../common/mod.rs"]
mod common;

use cabio::constants::{FRAME_ESCAPE, FRAME_SYNC};
use cabio::protocol::Frame;
use cabio::Error;
use common::fixtures;
use proptest::prelude::*;

#[test]
fn protocol_version_request_matches_fixture() {
    let frame = Frame::new(0x02, 0x01, vec![0xF3]);
    assert_eq!(
        frame.encode().unwrap(),
        fixtures::wire(fixtures::PROTOCOL_VERSION_REQUEST)
    );
}

#[test]
fn escaped_fixture_decodes_to_reserved_values() {
    let frame = Frame::decode(&fixtures::wire(fixtures::SET_LED_ESCAPED_REQUEST)).unwrap();
    assert_eq!(frame.payload, vec![0x82, 0xE0, 0xD0, 0x01]);
}

#[test]
fn corrupted_checksum_is_crc_error() {
    let mut wire = fixtures::wire(fixtures::FW_SUM_RESPONSE);
    let last = wire.len() - 1;
    wire[last] = wire[last].wrapping_add(1);
    let err = Frame::decode(&wire).unwrap_err();
    assert!(err.is_crc(), "unexpected error: {err}");
}

#[test]
fn oversized_payload_cannot_be_framed() {
    let frame = Frame::new(1, 2, vec![0; 256]);
    assert!(matches!(
        frame.encode(),
        Err(Error::InvalidLength { expected: 255, actual: 256 })
    ));
}

proptest! {
    #[test]
    fn any_frame_roundtrips(
        dest in any::<u8>(),
        src in any::<u8>(),
        payload in prop::collection::vec(any::<u8>(), 0..=255),
    ) {
        let frame = Frame::new(dest, src, payload);
        let wire = frame.encode().unwrap();
        prop_assert_eq!(Frame::decode(&wire).unwrap(), frame);
    }

    #[test]
    fn no_unescaped_reserved_bytes_after_sync(
        payload in prop::collection::vec(prop_oneof![Just(FRAME_SYNC), Just(FRAME_ESCAPE), any::<u8>()], 0..64),
    ) {
        let wire = Frame::new(FRAME_SYNC, FRAME_ESCAPE, payload).encode().unwrap();
        prop_assert_eq!(wire[0], FRAME_SYNC);
        prop_assert!(!wire[1..].contains(&FRAME_SYNC));

        // every escape byte introduces exactly one stuffed value
        let mut i = 1;
        while i < wire.len() {
            if wire[i] == FRAME_ESCAPE {
                prop_assert!(i + 1 < wire.len());
                let value = wire[i + 1].wrapping_add(1);
                prop_assert!(value == FRAME_SYNC || value == FRAME_ESCAPE);
                i += 2;
            } else {
                i += 1;
            }
        }
    }

    #[test]
    fn single_bit_flip_in_body_is_rejected(
        payload in prop::collection::vec(any::<u8>(), 1..32),
        byte in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let frame = Frame::new(0x01, 0x02, payload);
        let mut raw = frame.to_raw().unwrap();
        let checksum = frame.checksum().unwrap();

        // flip a payload bit; the length byte is left alone so the frame
        // stays length-complete
        let i = 4 + byte.index(raw.len() - 4);
        raw[i] ^= 1 << bit;
        raw.push(checksum);

        let mut wire = vec![FRAME_SYNC];
        for &b in &raw[1..] {
            if b == FRAME_SYNC || b == FRAME_ESCAPE {
                wire.push(FRAME_ESCAPE);
                wire.push(b - 1);
            } else {
                wire.push(b);
            }
        }
        let err = Frame::decode(&wire).unwrap_err();
        prop_assert!(err.is_crc());
    }
}
