// cabio/src/protocol/iobuf.rs

use crate::{Error, Result};

/// Bounded byte queue. Backs both directions of a virtual UART and the
/// scratch buffer frames are unstuffed into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IoBuf {
    bytes: Vec<u8>,
    capacity: usize,
}

impl IoBuf {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Build a queue pre-filled with `data`; capacity is exactly `data.len()`.
    pub fn from_slice(data: &[u8]) -> Self {
        Self {
            bytes: data.to_vec(),
            capacity: data.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.bytes.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn push(&mut self, byte: u8) -> Result<()> {
        if self.bytes.len() >= self.capacity {
            return Err(Error::InsufficientBuffer {
                needed: self.bytes.len() + 1,
                capacity: self.capacity,
            });
        }
        self.bytes.push(byte);
        Ok(())
    }

    /// Append all of `data` or nothing.
    pub fn extend(&mut self, data: &[u8]) -> Result<()> {
        if data.len() > self.remaining() {
            return Err(Error::InsufficientBuffer {
                needed: self.bytes.len() + data.len(),
                capacity: self.capacity,
            });
        }
        self.bytes.extend_from_slice(data);
        Ok(())
    }

    /// Remove the first `n` bytes, keeping whatever follows them.
    pub fn consume(&mut self, n: usize) {
        let n = n.min(self.bytes.len());
        self.bytes.drain(..n);
    }

    /// Remove and return up to `max` leading bytes.
    pub fn take(&mut self, max: usize) -> Vec<u8> {
        let n = max.min(self.bytes.len());
        self.bytes.drain(..n).collect()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}
