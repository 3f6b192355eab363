// cabio/src/hid/mod.rs

//! HID card reader support: device pool, per-device read state machine,
//! logical unit striping and hotplug handling.

pub mod backend;
pub mod context;
pub mod hotplug;
pub mod mock;
pub mod multiplexer;
pub mod registry;

pub use backend::{HidBackend, HidCaps, HidDevice, ReadStatus, ValueCap};
pub use context::{DeviceContext, PollResult};
pub use hotplug::{DeviceEvent, Hotplug, HotplugNotifier};
pub use mock::{MockHidBackend, MockReader, ScriptedRead};
pub use multiplexer::{Multiplexer, stripe};
pub use registry::HidRegistry;
