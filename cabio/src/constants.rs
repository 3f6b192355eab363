// cabio/src/constants.rs
//! Common protocol constants used across the crate

/// LED board frame sync byte. Never appears unescaped inside a frame body.
pub const FRAME_SYNC: u8 = 0xE0;

/// LED board escape byte. `[FRAME_ESCAPE, b]` decodes to `b + 1`.
pub const FRAME_ESCAPE: u8 = 0xD0;

/// sync(1) + dest(1) + src(1) + len(1)
pub const FRAME_HEADER_LEN: usize = 4;

/// Header plus trailing checksum byte
pub const FRAME_OVERHEAD: usize = FRAME_HEADER_LEN + 1;

/// Largest request payload the board accepts after the command byte
pub const MAX_REQUEST_ARGS: usize = 256;

/// Decoded request buffer: header + command + args
pub const MAX_REQUEST_FRAME_LEN: usize = FRAME_HEADER_LEN + 1 + MAX_REQUEST_ARGS;

/// Size of each virtual UART queue
pub const UART_QUEUE_LEN: usize = 520;

/// LED board command codes
pub const CMD_RESET: u8 = 0x10;
pub const CMD_SET_TIMEOUT: u8 = 0x11;
pub const CMD_SET_DISABLE_RESPONSE: u8 = 0x14;
pub const CMD_SET_LED: u8 = 0x82;
pub const CMD_SET_LED_COUNT: u8 = 0x86;
pub const CMD_BOARD_INFO: u8 = 0xF0;
pub const CMD_BOARD_STATUS: u8 = 0xF1;
pub const CMD_FW_SUM: u8 = 0xF2;
pub const CMD_PROTOCOL_VER: u8 = 0xF3;
pub const CMD_BOOTLOADER: u8 = 0xFD;

/// Reset sub-type sent by the games
pub const RESET_TYPE_DEFAULT: u8 = 0xD9;

/// Fixed status / report fields carried by every board response
pub const RESP_STATUS_OK: u8 = 1;
pub const RESP_REPORT_OK: u8 = 1;

/// Protocol version tuple reported by the board
pub const PROTOCOL_VERSION: [u8; 3] = [1, 1, 4];

/// HID usage page exposed by compatible card readers
pub const CARD_READER_USAGE_PAGE: u16 = 0xFFCA;

/// Value usage reported for ISO 15693 (AiMe) cards
pub const USAGE_ISO_15693: u16 = 0x41;

/// Value usage reported for ISO 18092 (FeliCa) cards
pub const USAGE_ISO_18092: u16 = 0x42;

/// Per-device report / usage value buffer size
pub const HID_REPORT_BUFFER_LEN: usize = 128;

/// Pool slots allocated before any device is discovered
pub const DEFAULT_ALLOCATED_CONTEXTS: usize = 2;

/// AiMe access code length in bytes
pub const AIME_ID_LEN: usize = 10;

/// FeliCa IDm length in bytes
pub const FELICA_ID_LEN: usize = 8;

/// Virtual key code of the Enter key, the default card scan key
pub const VK_RETURN: u8 = 0x0D;
