// cabio/src/hid/context.rs

use std::fmt;

use log::{debug, info, warn};

use crate::constants::{CARD_READER_USAGE_PAGE, HID_REPORT_BUFFER_LEN};
use crate::hid::backend::{HidBackend, HidCaps, HidDevice, ReadStatus, ValueCap};
use crate::types::CardType;
use crate::{Error, Result};

/// Result of one non-blocking poll of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollResult {
    Error,
    NotReady,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadState {
    Idle,
    Pending,
}

/// One pool slot: the in-process state of a physical card reader.
pub struct DeviceContext {
    path: Option<String>,
    device: Option<Box<dyn HidDevice>>,
    caps: HidCaps,
    value_caps: Vec<ValueCap>,
    state: ReadState,
    read_size: usize,
    report: [u8; HID_REPORT_BUFFER_LEN],
    usage_value: [u8; HID_REPORT_BUFFER_LEN],
    initialized: bool,
}

impl Default for DeviceContext {
    fn default() -> Self {
        Self {
            path: None,
            device: None,
            caps: HidCaps::default(),
            value_caps: Vec::new(),
            state: ReadState::Idle,
            read_size: 0,
            report: [0; HID_REPORT_BUFFER_LEN],
            usage_value: [0; HID_REPORT_BUFFER_LEN],
            initialized: false,
        }
    }
}

impl fmt::Debug for DeviceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceContext")
            .field("path", &self.path)
            .field("initialized", &self.initialized)
            .field("pending", &self.is_pending())
            .field("read_size", &self.read_size)
            .field("value_caps", &self.value_caps.len())
            .finish()
    }
}

impl DeviceContext {
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_pending(&self) -> bool {
        self.state == ReadState::Pending
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn caps(&self) -> &HidCaps {
        &self.caps
    }

    /// Device paths differ in case between discovery and removal
    /// notifications.
    pub fn matches_path(&self, path: &str) -> bool {
        self.initialized
            && self
                .path
                .as_deref()
                .is_some_and(|p| p.eq_ignore_ascii_case(path))
    }

    /// Normalized ID bytes decoded by the last successful [`read`](Self::read).
    pub fn usage_value(&self) -> &[u8; HID_REPORT_BUFFER_LEN] {
        &self.usage_value
    }

    /// Open `path` and keep it if it is a card reader. On error the slot
    /// may be half filled; the caller resets it.
    pub fn open(&mut self, backend: &dyn HidBackend, path: &str) -> Result<()> {
        self.path = Some(path.to_string());
        let device = backend.open(path)?;
        let caps = device.capabilities()?;

        if caps.usage_page != CARD_READER_USAGE_PAGE {
            return Err(Error::UnsupportedDevice {
                path: path.to_string(),
                reason: format!("usage page {:#06x}", caps.usage_page),
            });
        }
        if caps.num_input_value_caps == 0 {
            return Err(Error::UnsupportedDevice {
                path: path.to_string(),
                reason: "no input value capabilities".into(),
            });
        }

        let value_caps = device.value_caps()?;
        info!(
            "HID card reader on {}: usage {:#06x}, {} value caps, input report {} bytes",
            path,
            caps.usage,
            value_caps.len(),
            caps.input_report_len
        );

        self.device = Some(device);
        self.caps = caps;
        self.value_caps = value_caps;
        self.initialized = true;
        Ok(())
    }

    /// Cancel any outstanding read and release the device. The slot keeps
    /// its buffers zeroed and becomes free for reuse.
    pub fn reset(&mut self) {
        if let Some(mut device) = self.device.take() {
            device.cancel();
        }
        *self = Self::default();
    }

    /// Advance the read state machine without blocking.
    pub fn poll(&mut self) -> PollResult {
        if !self.initialized {
            return PollResult::Error;
        }
        let Some(device) = self.device.as_mut() else {
            return PollResult::Error;
        };

        match self.state {
            ReadState::Idle => match device.start_read(&mut self.report) {
                Ok(ReadStatus::Complete(n)) => {
                    self.read_size = n;
                    PollResult::Ready
                }
                Ok(ReadStatus::Pending) => {
                    self.state = ReadState::Pending;
                    PollResult::NotReady
                }
                Err(e) => {
                    debug!("card read failed to start: {}", e);
                    PollResult::Error
                }
            },
            ReadState::Pending => match device.poll_read(&mut self.report) {
                Ok(Some(n)) => {
                    self.state = ReadState::Idle;
                    self.read_size = n;
                    PollResult::Ready
                }
                Ok(None) => PollResult::NotReady,
                Err(e) => {
                    // the read is over either way
                    self.state = ReadState::Idle;
                    debug!("card read completion failed: {}", e);
                    PollResult::Error
                }
            },
        }
    }

    /// Classify the report just read and decode its ID into the usage
    /// buffer. Only meaningful right after [`PollResult::Ready`].
    pub fn read(&mut self) -> CardType {
        if !self.initialized || self.is_pending() || self.read_size == 0 {
            return CardType::None;
        }

        let report = &self.report[..self.read_size.min(HID_REPORT_BUFFER_LEN)];
        for cap in &self.value_caps {
            if cap.report_id != report[0] {
                continue;
            }
            if cap.extract(report, &mut self.usage_value).is_none() {
                warn!(
                    "short report for usage {:#04x}: {} bytes",
                    cap.usage, self.read_size
                );
                return CardType::None;
            }
            return CardType::from_usage(cap.usage);
        }

        debug!(
            "report for unknown usage: {}",
            crate::utils::bytes_to_hex_spaced_upper(&report[..report.len().min(9)])
        );
        CardType::None
    }
}
