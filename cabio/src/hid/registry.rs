// cabio/src/hid/registry.rs

use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info, warn};

use crate::constants::DEFAULT_ALLOCATED_CONTEXTS;
use crate::hid::backend::HidBackend;
use crate::hid::context::DeviceContext;
use crate::{Error, Result};

/// Pool of device contexts behind one lock.
///
/// Slots are never removed: a device that goes away leaves a free slot,
/// and the next device to arrive takes the lowest free slot before the
/// pool grows. Indices into the pool are only meaningful while the lock is
/// held.
pub struct HidRegistry {
    backend: Arc<dyn HidBackend>,
    pool: Mutex<Vec<DeviceContext>>,
}

impl HidRegistry {
    pub fn new(backend: Arc<dyn HidBackend>) -> Self {
        let pool = (0..DEFAULT_ALLOCATED_CONTEXTS)
            .map(|_| DeviceContext::default())
            .collect();
        Self {
            backend,
            pool: Mutex::new(pool),
        }
    }

    /// Exclusive access to the pool. Callers that poll and then read a
    /// device must do both under one guard.
    pub fn lock(&self) -> MutexGuard<'_, Vec<DeviceContext>> {
        self.pool.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn with_pool<T>(&self, f: impl FnOnce(&mut Vec<DeviceContext>) -> T) -> T {
        f(&mut self.lock())
    }

    /// Number of slots, free ones included.
    pub fn capacity(&self) -> usize {
        self.lock().len()
    }

    pub fn device_count(&self) -> usize {
        self.lock().iter().filter(|c| c.is_initialized()).count()
    }

    /// Slot currently holding `path`.
    pub fn slot_of(&self, path: &str) -> Option<usize> {
        self.lock().iter().position(|c| c.matches_path(path))
    }

    /// Open `path` and register it if it is a card reader. Returns the slot
    /// it landed in.
    pub fn add(&self, path: &str) -> Result<usize> {
        let mut pool = self.lock();

        let slot = match pool.iter().position(|c| !c.is_initialized()) {
            Some(i) => i,
            None => {
                pool.push(DeviceContext::default());
                debug!("HID pool grown to {} slots", pool.len());
                pool.len() - 1
            }
        };

        let ctx = &mut pool[slot];
        match ctx.open(self.backend.as_ref(), path) {
            Ok(()) => {
                info!("HID device added in slot {}: {}", slot, path);
                Ok(slot)
            }
            Err(e) => {
                ctx.reset();
                Err(e)
            }
        }
    }

    /// Release the device at `path`. Returns whether it was registered.
    pub fn remove(&self, path: &str) -> bool {
        let mut pool = self.lock();

        match pool.iter_mut().enumerate().find(|(_, c)| c.matches_path(path)) {
            Some((slot, ctx)) => {
                ctx.reset();
                info!("HID device removed from slot {}: {}", slot, path);
                true
            }
            None => false,
        }
    }

    /// Register every card reader currently present. Non-reader devices are
    /// skipped; only a failed enumeration is an error.
    pub fn scan(&self) -> Result<usize> {
        let paths = self
            .backend
            .enumerate()
            .map_err(|e| Error::Init(format!("HID enumeration failed: {}", e)))?;

        let mut added = 0;
        for path in &paths {
            match self.add(path) {
                Ok(_) => added += 1,
                Err(e @ Error::UnsupportedDevice { .. }) => debug!("skipping {}", e),
                Err(e) => warn!("HID device rejected: {}", e),
            }
        }

        info!(
            "HID scan: {} card reader(s) among {} device(s)",
            added,
            paths.len()
        );
        Ok(added)
    }

    /// Cancel outstanding reads and drop every device.
    pub fn close(&self) {
        let mut pool = self.lock();
        for ctx in pool.iter_mut() {
            ctx.reset();
        }
        pool.clear();
    }
}
