// cabio/src/hid/backend.rs

use crate::Result;

/// Top-level capabilities of an opened HID collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HidCaps {
    pub usage_page: u16,
    pub usage: u16,
    pub input_report_len: u16,
    pub num_input_value_caps: u16,
}

/// One input value capability: where a usage's value array lives in a
/// report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueCap {
    pub report_id: u8,
    pub usage: u16,
    pub bit_size: u16,
    pub report_count: u16,
}

impl ValueCap {
    /// Bytes occupied by the value array, following the report ID.
    pub fn array_len(&self) -> usize {
        self.report_count as usize * (self.bit_size as usize).div_ceil(8)
    }

    /// Copy this usage's value array out of `report` into `out`.
    ///
    /// `report` is `[report_id, values..]`. Returns `None` when the report
    /// carries a different ID or is too short to hold the array.
    pub fn extract(&self, report: &[u8], out: &mut [u8]) -> Option<usize> {
        let (&id, values) = report.split_first()?;
        if id != self.report_id {
            return None;
        }
        let len = self.array_len();
        let src = values.get(..len)?;
        let n = len.min(out.len());
        out[..n].copy_from_slice(&src[..n]);
        Some(n)
    }
}

/// Outcome of issuing an asynchronous read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// Completed synchronously with this many bytes
    Complete(usize),
    /// In flight; completion is picked up by [`HidDevice::poll_read`]
    Pending,
}

/// An opened HID device node.
///
/// At most one read is in flight at a time; the caller guarantees that
/// `start_read` is not called again until `poll_read` reported completion.
pub trait HidDevice: Send {
    fn capabilities(&self) -> Result<HidCaps>;

    fn value_caps(&self) -> Result<Vec<ValueCap>>;

    /// Issue a read into `buf`.
    fn start_read(&mut self, buf: &mut [u8]) -> Result<ReadStatus>;

    /// Non-blocking completion check for the outstanding read.
    /// `Ok(None)` while still in flight.
    fn poll_read(&mut self, buf: &mut [u8]) -> Result<Option<usize>>;

    /// Abandon any outstanding read.
    fn cancel(&mut self) {}
}

/// Platform device discovery.
pub trait HidBackend: Send + Sync {
    /// Paths of every HID device currently present.
    fn enumerate(&self) -> Result<Vec<String>>;

    fn open(&self, path: &str) -> Result<Box<dyn HidDevice>>;
}
