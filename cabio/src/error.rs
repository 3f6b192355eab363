// cabio/src/error.rs

use thiserror::Error;

/// Common error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("device not found")]
    DeviceNotFound,

    #[error("failed to open device {path}: {reason}")]
    DeviceOpen { path: String, reason: String },

    #[error("unsupported device {path}: {reason}")]
    UnsupportedDevice { path: String, reason: String },

    #[error("device i/o error: {0}")]
    DeviceIo(String),

    #[error("hid backend error: {0}")]
    Backend(String),

    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("insufficient buffer: need {needed} bytes, capacity {capacity}")]
    InsufficientBuffer { needed: usize, capacity: usize },

    #[error("checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    #[error("frame format error: {0}")]
    FrameFormat(String),

    #[error("no card present")]
    CardNotPresent,

    #[error("card id file {path}: {reason}")]
    IdFile { path: String, reason: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("initialization failed: {0}")]
    Init(String),
}

impl Error {
    /// True for checksum failures, the CRC class of protocol rejection.
    pub fn is_crc(&self) -> bool {
        matches!(self, Error::ChecksumMismatch { .. })
    }

    /// Protocol errors after which the byte stream is still usable.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::ChecksumMismatch { .. } | Error::FrameFormat(_) | Error::InvalidLength { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
