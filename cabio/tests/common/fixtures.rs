// fixtures.rs: wire images and card IDs shared by the integration tests

use cabio::protocol::BoardInfo;

/// Host -> board 2: get protocol version
pub const PROTOCOL_VERSION_REQUEST: &str = "e0020101f3f7";

/// Board 2 -> host: protocol version 1.1.4
pub const PROTOCOL_VERSION_RESPONSE: &str = "e001020601f30101010404";

/// Host -> board 2: get firmware checksum
pub const FW_SUM_REQUEST: &str = "e0020101f2f6";

/// Board 2 -> host: firmware checksum 0xADF7
pub const FW_SUM_RESPONSE: &str = "e001020501f201adf7a0";

/// Host -> board 2: reset, type 0xD9
pub const RESET_REQUEST: &str = "e002010210d9ee";

/// Board 2 -> host: reset acknowledged
pub const RESET_RESPONSE: &str = "e001020301100118";

/// Host -> board 2: set-led with RGB payload [E0 D0 01], both reserved
/// values escaped
pub const SET_LED_ESCAPED_REQUEST: &str = "e002010482d0dfd0cf013a";

pub fn wire(hex_str: &str) -> Vec<u8> {
    hex::decode(hex_str).expect("valid hex fixture")
}

pub fn sample_aime_id() -> [u8; 10] {
    [0x01, 0x23, 0x45, 0x67, 0x89, 0x01, 0x23, 0x45, 0x67, 0x89]
}

pub fn sample_felica_id() -> [u8; 8] {
    [0x01, 0x2E, 0x4C, 0xD8, 0xA3, 0x0A, 0x3C, 0x75]
}

pub fn aime_file_text() -> String {
    "01 23 45 67 89 01 23 45 67 89\n".to_string()
}

pub fn felica_file_text() -> String {
    "01 2E 4C D8 A3 0A 3C 75\n".to_string()
}

pub fn default_board_info() -> BoardInfo {
    BoardInfo {
        board_number: *b"15093-06",
        chip_number: *b"6710 ",
        fw_ver: 0x90,
    }
}
