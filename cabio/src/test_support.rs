//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize fake device and LED sink setup so tests across
//! the crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use crate::board::LedSink;
use crate::hid::{HidRegistry, MockHidBackend, MockReader};
use crate::protocol::{Command, Request};
use crate::types::BoardIndex;
use crate::Result;

/// LED sink that remembers every call.
#[doc(hidden)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    inits: Mutex<Vec<BoardIndex>>,
    frames: Mutex<Vec<(BoardIndex, Vec<u8>)>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inits(&self) -> Vec<BoardIndex> {
        self.inits.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn frames(&self) -> Vec<(BoardIndex, Vec<u8>)> {
        self.frames.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

impl LedSink for RecordingSink {
    fn init(&self, board: BoardIndex) -> Result<()> {
        self.inits
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(board);
        Ok(())
    }

    fn set_leds(&self, board: BoardIndex, rgb: &[u8]) {
        self.frames
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push((board, rgb.to_vec()));
    }
}

/// Wire image of a host request addressed to board `2` from host `1`.
#[doc(hidden)]
pub fn host_request(command: Command) -> Result<Vec<u8>> {
    Request::new(2, 1, command).to_frame().encode()
}

/// A fake backend with one card reader per path, plus a registry over it
/// with every reader added in order.
#[doc(hidden)]
pub fn registry_with_readers(
    paths: &[&str],
) -> Result<(Arc<MockHidBackend>, Vec<MockReader>, HidRegistry)> {
    let backend = Arc::new(MockHidBackend::new());
    let readers: Vec<MockReader> = paths
        .iter()
        .map(|p| {
            let r = MockReader::new();
            backend.attach(p, r.clone());
            r
        })
        .collect();

    let registry = HidRegistry::new(backend.clone());
    for p in paths {
        registry.add(p)?;
    }
    Ok((backend, readers, registry))
}
