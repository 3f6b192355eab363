// cabio/src/protocol/frame.rs

use crate::constants::{FRAME_HEADER_LEN, FRAME_OVERHEAD, FRAME_SYNC};
use crate::protocol::checksum;
use crate::protocol::codec::{self, Decoded};
use crate::protocol::iobuf::IoBuf;
use crate::{Error, Result};

/// LED board frame with the sync byte, escaping and checksum stripped.
///
/// Format on the wire: [Sync(1)] [Dest(1)] [Src(1)] [Len(1)] [Payload(n)] [Sum(1)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub dest_addr: u8,
    pub src_addr: u8,
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn new(dest_addr: u8, src_addr: u8, payload: Vec<u8>) -> Self {
        Self {
            dest_addr,
            src_addr,
            payload,
        }
    }

    /// Unescaped header + payload, the input [`codec::encode`] expects.
    pub fn to_raw(&self) -> Result<Vec<u8>> {
        if self.payload.len() > u8::MAX as usize {
            return Err(Error::InvalidLength {
                expected: u8::MAX as usize,
                actual: self.payload.len(),
            });
        }

        let mut out = Vec::with_capacity(FRAME_HEADER_LEN + self.payload.len());
        out.push(FRAME_SYNC);
        out.push(self.dest_addr);
        out.push(self.src_addr);
        out.push(self.payload.len() as u8);
        out.extend_from_slice(&self.payload);
        Ok(out)
    }

    /// Checksum this frame carries on the wire.
    pub fn checksum(&self) -> Result<u8> {
        let raw = self.to_raw()?;
        Ok(checksum::sum(&raw[1..]))
    }

    /// Parse an unescaped, already verified frame (sync through checksum)
    /// as produced by [`codec::decode`].
    pub fn from_raw(raw: &[u8]) -> Result<Self> {
        if raw.len() < FRAME_OVERHEAD {
            return Err(Error::InvalidLength {
                expected: FRAME_OVERHEAD,
                actual: raw.len(),
            });
        }
        if raw[0] != FRAME_SYNC {
            return Err(Error::FrameFormat("missing sync byte".into()));
        }

        let len = raw[3] as usize;
        let required = len + FRAME_OVERHEAD;
        if raw.len() != required {
            return Err(Error::InvalidLength {
                expected: required,
                actual: raw.len(),
            });
        }

        Ok(Self {
            dest_addr: raw[1],
            src_addr: raw[2],
            payload: raw[FRAME_HEADER_LEN..FRAME_HEADER_LEN + len].to_vec(),
        })
    }

    /// Encode into a complete wire image.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let raw = self.to_raw()?;
        let mut out = IoBuf::with_capacity(codec::max_encoded_len(raw.len()) + 1);
        codec::encode(&mut out, &raw)?;
        Ok(out.as_slice().to_vec())
    }

    /// Decode the first frame found in `wire`.
    pub fn decode(wire: &[u8]) -> Result<Self> {
        let mut src = IoBuf::from_slice(wire);
        let mut dest = IoBuf::with_capacity(wire.len().max(FRAME_OVERHEAD));
        match codec::decode(&mut dest, &mut src)? {
            Decoded::Accepted => Self::from_raw(dest.as_slice()),
            Decoded::Incomplete => Err(Error::FrameFormat("incomplete frame".into())),
        }
    }
}
