// cabio/src/config.rs
//! Configuration consumed by the emulated peripherals.
//!
//! Loading these from the cabinet's `.ini` file is the host's job; the
//! defaults below match what the stock configuration ships with.

use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::VK_RETURN;
use crate::{Error, Result};

/// Card reader configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct AimeConfig {
    /// Text file holding a 10 byte AiMe access code
    pub aime_path: PathBuf,
    /// Text file holding an 8 byte FeliCa IDm
    pub felica_path: PathBuf,
    /// Generate and persist a random FeliCa IDm when no ID file exists
    pub felica_gen: bool,
    /// Virtual key that must be held for a file-backed card to appear
    pub scan_key: u8,
    /// Read cards from physical HID readers instead of ID files
    pub use_hardware: bool,
}

impl Default for AimeConfig {
    fn default() -> Self {
        Self {
            aime_path: PathBuf::from("DEVICE").join("aime.txt"),
            felica_path: PathBuf::from("DEVICE").join("felica.txt"),
            felica_gen: true,
            scan_key: VK_RETURN,
            use_hardware: false,
        }
    }
}

/// LED controller board configuration, shared by every emulated board.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct LedBoardConfig {
    pub enable: bool,
    pub board_number: String,
    pub chip_number: String,
    pub fw_ver: u8,
    pub fw_sum: u16,
    pub board_addr: u8,
    pub host_addr: u8,
    /// COM port of board 0; board `i` sits on `first_port + i`
    pub first_port: u32,
    pub num_boards: usize,
}

impl Default for LedBoardConfig {
    fn default() -> Self {
        Self {
            enable: true,
            board_number: "15093-06".to_string(),
            chip_number: "6710 ".to_string(),
            fw_ver: 0x90,
            fw_sum: 0xADF7,
            board_addr: 2,
            host_addr: 1,
            first_port: 10,
            num_boards: 2,
        }
    }
}

/// Copy `s` into a fixed field, truncating or padding with spaces.
fn space_padded<const N: usize>(s: &str) -> [u8; N] {
    let mut out = [b' '; N];
    for (dst, src) in out.iter_mut().zip(s.bytes()) {
        *dst = src;
    }
    out
}

impl LedBoardConfig {
    pub fn board_number_bytes(&self) -> [u8; 8] {
        space_padded(&self.board_number)
    }

    pub fn chip_number_bytes(&self) -> [u8; 5] {
        space_padded(&self.chip_number)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_boards == 0 {
            return Err(Error::Init("num_boards must be at least 1".into()));
        }
        if !self.board_number.is_ascii() || !self.chip_number.is_ascii() {
            return Err(Error::Init("board identity strings must be ASCII".into()));
        }
        Ok(())
    }
}
