// cabio/src/hid/multiplexer.rs

use std::iter::StepBy;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, info};

use crate::hid::context::{DeviceContext, PollResult};
use crate::types::UnitNo;

/// Maps the game's logical reader units onto physical devices.
///
/// With `N` known units, unit `u` owns devices `u, u+N, u+2N, ..`. `N`
/// only ever grows: polling a unit beyond it raises `N` and restripes
/// every unit from then on.
#[derive(Debug)]
pub struct Multiplexer {
    units: AtomicUsize,
}

impl Default for Multiplexer {
    fn default() -> Self {
        Self {
            units: AtomicUsize::new(1),
        }
    }
}

/// Device indices owned by `unit` when there are `units` logical units and
/// `len` pool slots.
pub fn stripe(unit: UnitNo, units: usize, len: usize) -> StepBy<Range<usize>> {
    (unit.index()..len).step_by(units.max(1))
}

impl Multiplexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently known number of logical units.
    pub fn unit_count(&self) -> usize {
        self.units.load(Ordering::SeqCst)
    }

    /// Record that `unit` exists and return the unit count to stripe with.
    pub fn observe(&self, unit: UnitNo) -> usize {
        let wanted = unit.index() + 1;
        let prev = self.units.fetch_max(wanted, Ordering::SeqCst);
        if wanted > prev {
            info!("max number of game readers is now {}", wanted);
            wanted
        } else {
            prev
        }
    }

    /// Poll every initialized device owned by `unit` until one has a card.
    /// Returns that device's index. The caller holds the pool lock.
    pub fn poll_unit(&self, pool: &mut [DeviceContext], unit: UnitNo) -> Option<usize> {
        let units = self.observe(unit);

        for i in stripe(unit, units, pool.len()) {
            let ctx = &mut pool[i];
            if !ctx.is_initialized() {
                continue;
            }
            match ctx.poll() {
                PollResult::Ready => return Some(i),
                PollResult::NotReady => {}
                PollResult::Error => debug!("error polling card reader in slot {}", i),
            }
        }
        None
    }
}
