// cabio/src/hid/hotplug.rs

//! Device arrival / removal worker.
//!
//! The platform's notification source feeds [`DeviceEvent`]s through a
//! [`HotplugNotifier`]; a dedicated thread applies them to the registry so
//! the notification callback itself never takes the pool lock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use log::{debug, info, warn};

use crate::hid::registry::HidRegistry;
use crate::utils::{HANDSHAKE_TIMEOUT_MS, handshake_interval, ms};
use crate::{Error, Result};

/// A device node appeared or went away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceEvent {
    Arrived(String),
    Removed(String),
}

#[derive(Debug)]
enum Message {
    Event(DeviceEvent),
    Shutdown,
}

/// Cloneable handle for posting events to the worker.
#[derive(Debug, Clone)]
pub struct HotplugNotifier {
    tx: Sender<Message>,
}

impl HotplugNotifier {
    pub fn send(&self, event: DeviceEvent) -> Result<()> {
        self.tx
            .send(Message::Event(event))
            .map_err(|_| Error::Backend("hotplug worker is not running".into()))
    }

    pub fn arrived(&self, path: &str) -> Result<()> {
        self.send(DeviceEvent::Arrived(path.to_string()))
    }

    pub fn removed(&self, path: &str) -> Result<()> {
        self.send(DeviceEvent::Removed(path.to_string()))
    }
}

/// Running worker. Dropping it stops the thread.
pub struct Hotplug {
    tx: Option<Sender<Message>>,
    handle: Option<JoinHandle<()>>,
}

impl Hotplug {
    /// Spawn the worker and wait until it is listening.
    pub fn start(registry: Arc<HidRegistry>) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let ready = Arc::new(AtomicBool::new(false));

        let worker_ready = Arc::clone(&ready);
        let handle = thread::Builder::new()
            .name("cabio-hotplug".into())
            .spawn(move || run(registry, rx, worker_ready))
            .map_err(|e| Error::Init(format!("failed to spawn hotplug worker: {}", e)))?;

        let mut hotplug = Self {
            tx: Some(tx),
            handle: Some(handle),
        };

        let started = Instant::now();
        while !ready.load(Ordering::Acquire) {
            if started.elapsed() > ms(HANDSHAKE_TIMEOUT_MS) {
                hotplug.shutdown();
                return Err(Error::Init("hotplug worker did not start".into()));
            }
            thread::sleep(handshake_interval());
        }

        Ok(hotplug)
    }

    pub fn notifier(&self) -> Option<HotplugNotifier> {
        self.tx.as_ref().map(|tx| HotplugNotifier { tx: tx.clone() })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the worker and wait for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.tx.take() {
            // outstanding notifiers keep the channel open
            let _ = tx.send(Message::Shutdown);
        }
        if let Some(handle) = self.handle.take() {
            debug!("hotplug worker shutting down");
            if handle.join().is_err() {
                warn!("hotplug worker panicked");
            }
        }
    }
}

impl Drop for Hotplug {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(registry: Arc<HidRegistry>, rx: Receiver<Message>, ready: Arc<AtomicBool>) {
    info!("device notification listener ready");
    ready.store(true, Ordering::Release);

    for message in rx {
        let event = match message {
            Message::Event(event) => event,
            Message::Shutdown => break,
        };
        match event {
            DeviceEvent::Arrived(path) => match registry.add(&path) {
                Ok(slot) => debug!("arrival handled: {} -> slot {}", path, slot),
                Err(e @ Error::UnsupportedDevice { .. }) => debug!("ignoring arrival: {}", e),
                Err(e) => warn!("failed to add HID device: {}", e),
            },
            DeviceEvent::Removed(path) => {
                if !registry.remove(&path) {
                    debug!("removal of unknown device {}", path);
                }
            }
        }
    }
}
