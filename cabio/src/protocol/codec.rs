// cabio/src/protocol/codec.rs

//! Byte-stuffed framing for the LED board wire protocol.
//!
//! Wire layout: `[sync] [dest] [src] [len] [payload(len)] [checksum]`. Inside
//! the body (everything after sync) a literal sync or escape byte `b` is sent
//! as `[FRAME_ESCAPE, b - 1]`.

use log::{trace, warn};

use crate::constants::{FRAME_ESCAPE, FRAME_HEADER_LEN, FRAME_OVERHEAD, FRAME_SYNC};
use crate::protocol::checksum;
use crate::protocol::iobuf::IoBuf;
use crate::{Error, Result};

/// Non-error outcomes of [`decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// Not enough bytes for a full frame yet. Nothing past the leading
    /// garbage was consumed.
    Incomplete,
    /// `dest` holds a complete, checksum-verified frame (sync through
    /// checksum, unescaped). Its bytes were removed from `src`.
    Accepted,
}

/// Drop every byte in front of the first sync byte.
fn resync(src: &mut IoBuf) {
    let skip = src
        .as_slice()
        .iter()
        .position(|&b| b == FRAME_SYNC)
        .unwrap_or(src.len());

    if skip > 0 {
        trace!("dropping {} bytes before frame sync", skip);
        src.consume(skip);
    }
}

/// Check whether `frame` is length-complete and, if so, whether its
/// checksum holds. `None` means keep reading.
fn accept(frame: &[u8]) -> Option<Result<()>> {
    if frame.len() < FRAME_HEADER_LEN {
        return None;
    }
    if frame.len() != frame[3] as usize + FRAME_OVERHEAD {
        return None;
    }

    let last = frame.len() - 1;
    let expected = checksum::sum(&frame[1..last]);
    let actual = frame[last];
    if expected != actual {
        return Some(Err(Error::ChecksumMismatch { expected, actual }));
    }
    Some(Ok(()))
}

/// Unstuff one frame from the front of `src` into `dest`.
///
/// Leading bytes before the first sync byte are always discarded. On any
/// terminal outcome (accepted or an error) the examined bytes are removed
/// from `src`; bytes after them stay queued for the next call. A sync byte
/// that interrupts a frame is consumed along with the abandoned frame, so
/// the frame it started is lost as well.
///
/// Errors: [`Error::ChecksumMismatch`] for a length-complete frame with a bad
/// checksum, [`Error::FrameFormat`] for an interrupted frame or a doubled
/// escape, [`Error::InsufficientBuffer`] when `dest` fills first.
pub fn decode(dest: &mut IoBuf, src: &mut IoBuf) -> Result<Decoded> {
    resync(src);
    dest.clear();

    let mut escape = false;
    let mut terminal: Option<(usize, Result<()>)> = None;

    for (i, &byte) in src.as_slice().iter().enumerate() {
        if i == 0 {
            if let Err(e) = dest.push(byte) {
                terminal = Some((i + 1, Err(e)));
                break;
            }
            continue;
        }

        if byte == FRAME_SYNC {
            terminal = Some((
                i + 1,
                Err(Error::FrameFormat("sync byte inside frame".into())),
            ));
            break;
        }

        if byte == FRAME_ESCAPE {
            if escape {
                terminal = Some((i + 1, Err(Error::FrameFormat("repeated escape byte".into()))));
                break;
            }
            escape = true;
            continue;
        }

        let value = if escape { byte.wrapping_add(1) } else { byte };
        escape = false;

        if let Err(e) = dest.push(value) {
            terminal = Some((i + 1, Err(e)));
            break;
        }

        if let Some(outcome) = accept(dest.as_slice()) {
            terminal = Some((i + 1, outcome));
            break;
        }
    }

    match terminal {
        None => Ok(Decoded::Incomplete),
        Some((consumed, outcome)) => {
            src.consume(consumed);
            outcome.map(|()| Decoded::Accepted)
        }
    }
}

/// Append the escaped form of `byte` to `out`.
fn stuff(out: &mut Vec<u8>, byte: u8) {
    if byte == FRAME_SYNC || byte == FRAME_ESCAPE {
        out.push(FRAME_ESCAPE);
        out.push(byte - 1);
    } else {
        out.push(byte);
    }
}

/// Byte-stuff an unescaped frame (`[sync, dest, src, len, payload..]`,
/// without checksum) and append it plus a freshly computed checksum to
/// `dest`. Nothing is written if `dest` lacks room for the whole image.
pub fn encode(dest: &mut IoBuf, frame: &[u8]) -> Result<()> {
    if frame.len() < FRAME_HEADER_LEN || frame[0] != FRAME_SYNC {
        return Err(Error::FrameFormat("missing frame header".into()));
    }
    let expected = frame[3] as usize + FRAME_HEADER_LEN;
    if frame.len() != expected {
        return Err(Error::InvalidLength {
            expected,
            actual: frame.len(),
        });
    }

    let mut out = Vec::with_capacity(2 * frame.len() + 1);
    out.push(FRAME_SYNC);
    let mut sum = 0u8;
    for &byte in &frame[1..] {
        sum = sum.wrapping_add(byte);
        stuff(&mut out, byte);
    }
    stuff(&mut out, sum);

    dest.extend(&out).inspect_err(|e| {
        warn!("cannot queue {} byte frame: {}", out.len(), e);
    })
}

/// Worst-case wire length of an unescaped frame of `raw_len` bytes
/// (excluding checksum).
pub fn max_encoded_len(raw_len: usize) -> usize {
    1 + 2 * raw_len
}
