// cabio/src/types.rs

use std::convert::TryFrom;

use derive_more::{Display, From, Into};

use crate::Error;
use crate::constants::{AIME_ID_LEN, FELICA_ID_LEN, USAGE_ISO_15693, USAGE_ISO_18092};

/// AiMe access code - Newtype Pattern (10 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AimeId([u8; AIME_ID_LEN]);

impl AimeId {
    pub fn from_bytes(bytes: [u8; AIME_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; AIME_ID_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for AimeId {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != AIME_ID_LEN {
            return Err(Error::InvalidLength {
                expected: AIME_ID_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; AIME_ID_LEN];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// FeliCa IDm - Newtype Pattern (8 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FelicaId([u8; FELICA_ID_LEN]);

impl FelicaId {
    pub fn from_bytes(bytes: [u8; FELICA_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; FELICA_ID_LEN] {
        &self.0
    }

    /// IDm as the games consume it: the bytes read as a big-endian integer.
    pub fn as_u64(&self) -> u64 {
        u64::from_be_bytes(self.0)
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for FelicaId {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != FELICA_ID_LEN {
            return Err(Error::InvalidLength {
                expected: FELICA_ID_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; FELICA_ID_LEN];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// Card family classified from a reader's value usage code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardType {
    None,
    /// ISO 15693, read as an AiMe access code
    Iso15693,
    /// ISO 18092, read as a FeliCa IDm
    Iso18092,
}

impl CardType {
    pub fn from_usage(usage: u16) -> Self {
        match usage {
            USAGE_ISO_15693 => Self::Iso15693,
            USAGE_ISO_18092 => Self::Iso18092,
            _ => Self::None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CardType::None => "none",
            CardType::Iso15693 => "ISO 15693",
            CardType::Iso18092 => "ISO 18092 (FeliCa)",
        }
    }
}

impl Default for CardType {
    fn default() -> Self {
        CardType::None
    }
}

/// Logical reader unit number as addressed by the game.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
pub struct UnitNo(u8);

impl UnitNo {
    pub const PRIMARY: Self = Self(0);

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Emulated LED board index (0-based).
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, From, Into)]
pub struct BoardIndex(usize);

impl BoardIndex {
    pub fn get(&self) -> usize {
        self.0
    }
}
