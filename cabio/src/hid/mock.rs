// cabio/src/hid/mock.rs

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::constants::{CARD_READER_USAGE_PAGE, USAGE_ISO_15693, USAGE_ISO_18092};
use crate::hid::backend::{HidBackend, HidCaps, HidDevice, ReadStatus, ValueCap};
use crate::{Error, Result};

/// Report ID the mock reader uses for AiMe (ISO 15693) IDs
pub const AIME_REPORT_ID: u8 = 1;
/// Report ID the mock reader uses for FeliCa (ISO 18092) IDs
pub const FELICA_REPORT_ID: u8 = 2;

/// Scripted outcome of the next read operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedRead {
    /// Read is issued but does not complete yet
    Pending,
    /// Completion check finds the read still in flight
    Waiting,
    /// Read completes with this report
    Complete(Vec<u8>),
    /// Issuing or completing the read fails
    Error,
}

#[derive(Debug)]
struct ReaderState {
    caps: HidCaps,
    value_caps: Vec<ValueCap>,
    script: Mutex<VecDeque<ScriptedRead>>,
    polls: AtomicUsize,
    cancelled: AtomicBool,
}

/// Fake card reader. Clones share the script, so a test keeps one handle
/// while the registry owns the opened device.
#[derive(Debug, Clone)]
pub struct MockReader {
    state: Arc<ReaderState>,
}

impl MockReader {
    /// A reader exposing both card families, like the real hardware.
    pub fn new() -> Self {
        Self::with_caps(
            CARD_READER_USAGE_PAGE,
            vec![
                ValueCap {
                    report_id: AIME_REPORT_ID,
                    usage: USAGE_ISO_15693,
                    bit_size: 8,
                    report_count: 10,
                },
                ValueCap {
                    report_id: FELICA_REPORT_ID,
                    usage: USAGE_ISO_18092,
                    bit_size: 8,
                    report_count: 8,
                },
            ],
        )
    }

    pub fn with_caps(usage_page: u16, value_caps: Vec<ValueCap>) -> Self {
        let caps = HidCaps {
            usage_page,
            usage: 1,
            input_report_len: 11,
            num_input_value_caps: value_caps.len() as u16,
        };
        Self {
            state: Arc::new(ReaderState {
                caps,
                value_caps,
                script: Mutex::new(VecDeque::new()),
                polls: AtomicUsize::new(0),
                cancelled: AtomicBool::new(false),
            }),
        }
    }

    pub fn aime_report(id: &[u8; 10]) -> Vec<u8> {
        let mut report = vec![AIME_REPORT_ID];
        report.extend_from_slice(id);
        report
    }

    pub fn felica_report(id: &[u8; 8]) -> Vec<u8> {
        let mut report = vec![FELICA_REPORT_ID];
        report.extend_from_slice(id);
        report
    }

    pub fn push(&self, read: ScriptedRead) {
        self.script().push_back(read);
    }

    /// Number of `start_read` + `poll_read` calls seen so far.
    pub fn polls(&self) -> usize {
        self.state.polls.load(Ordering::SeqCst)
    }

    pub fn was_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst)
    }

    fn script(&self) -> std::sync::MutexGuard<'_, VecDeque<ScriptedRead>> {
        self.state.script.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn next(&self) -> Option<ScriptedRead> {
        self.state.polls.fetch_add(1, Ordering::SeqCst);
        self.script().pop_front()
    }
}

impl Default for MockReader {
    fn default() -> Self {
        Self::new()
    }
}

fn fill(buf: &mut [u8], report: &[u8]) -> usize {
    let n = report.len().min(buf.len());
    buf[..n].copy_from_slice(&report[..n]);
    n
}

struct MockDevice {
    reader: MockReader,
}

impl HidDevice for MockDevice {
    fn capabilities(&self) -> Result<HidCaps> {
        Ok(self.reader.state.caps)
    }

    fn value_caps(&self) -> Result<Vec<ValueCap>> {
        Ok(self.reader.state.value_caps.clone())
    }

    fn start_read(&mut self, buf: &mut [u8]) -> Result<ReadStatus> {
        match self.reader.next() {
            Some(ScriptedRead::Complete(report)) => Ok(ReadStatus::Complete(fill(buf, &report))),
            Some(ScriptedRead::Error) => Err(Error::DeviceIo("scripted read failure".into())),
            Some(ScriptedRead::Pending | ScriptedRead::Waiting) | None => Ok(ReadStatus::Pending),
        }
    }

    fn poll_read(&mut self, buf: &mut [u8]) -> Result<Option<usize>> {
        match self.reader.next() {
            Some(ScriptedRead::Complete(report)) => Ok(Some(fill(buf, &report))),
            Some(ScriptedRead::Error) => Err(Error::DeviceIo("scripted completion failure".into())),
            Some(ScriptedRead::Pending | ScriptedRead::Waiting) | None => Ok(None),
        }
    }

    fn cancel(&mut self) {
        self.reader.state.cancelled.store(true, Ordering::SeqCst);
    }
}

/// Deterministic in-memory device tree.
#[derive(Debug, Default)]
pub struct MockHidBackend {
    devices: Mutex<Vec<(String, MockReader)>>,
    open_failures: Mutex<HashMap<String, String>>,
    fail_enumerate: AtomicBool,
}

impl MockHidBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plug in a device at `path`.
    pub fn attach(&self, path: &str, reader: MockReader) {
        self.devices
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push((path.to_string(), reader));
    }

    /// Unplug the device at `path`.
    pub fn detach(&self, path: &str) {
        self.devices
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .retain(|(p, _)| p != path);
    }

    /// Make opening `path` fail with `reason`.
    pub fn fail_open(&self, path: &str, reason: &str) {
        self.open_failures
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(path.to_string(), reason.to_string());
    }

    pub fn set_fail_enumerate(&self, fail: bool) {
        self.fail_enumerate.store(fail, Ordering::SeqCst);
    }
}

impl HidBackend for MockHidBackend {
    fn enumerate(&self) -> Result<Vec<String>> {
        if self.fail_enumerate.load(Ordering::SeqCst) {
            return Err(Error::Backend("device enumeration failed".into()));
        }
        Ok(self
            .devices
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .iter()
            .map(|(p, _)| p.clone())
            .collect())
    }

    fn open(&self, path: &str) -> Result<Box<dyn HidDevice>> {
        let failures = self.open_failures.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(reason) = failures.get(path) {
            return Err(Error::DeviceOpen {
                path: path.to_string(),
                reason: reason.clone(),
            });
        }

        let devices = self.devices.lock().unwrap_or_else(|p| p.into_inner());
        let reader = devices
            .iter()
            .find(|(p, _)| p.eq_ignore_ascii_case(path))
            .map(|(_, r)| r.clone())
            .ok_or_else(|| Error::DeviceOpen {
                path: path.to_string(),
                reason: "no such device".into(),
            })?;
        Ok(Box::new(MockDevice { reader }))
    }
}
