// cabio/src/card/resolver.rs

use std::sync::{Arc, Mutex};

use log::{debug, info, warn};

use crate::card::sources::{CardSource, ResolvedCard, file_sources, resolve_first};
use crate::config::AimeConfig;
use crate::constants::{AIME_ID_LEN, FELICA_ID_LEN};
use crate::hid::{HidBackend, HidRegistry, Hotplug, HotplugNotifier, Multiplexer};
use crate::types::{AimeId, CardType, FelicaId, UnitNo};
use crate::{Error, Result};

/// Keyboard state as seen by the scan hotkey.
pub trait KeyState: Send + Sync {
    fn is_held(&self, vk: u8) -> bool;
}

impl<F> KeyState for F
where
    F: Fn(u8) -> bool + Send + Sync,
{
    fn is_held(&self, vk: u8) -> bool {
        self(vk)
    }
}

/// Key state that never changes.
#[derive(Debug, Clone, Copy)]
pub struct FixedKey(pub bool);

impl KeyState for FixedKey {
    fn is_held(&self, _vk: u8) -> bool {
        self.0
    }
}

/// Cards seen by the last poll of a unit. At most one is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Presence {
    aime: Option<AimeId>,
    felica: Option<FelicaId>,
}

impl Presence {
    fn from_card(card: ResolvedCard) -> Self {
        match card {
            ResolvedCard::Aime(id) => Self {
                aime: Some(id),
                felica: None,
            },
            ResolvedCard::Felica(id) => Self {
                aime: None,
                felica: Some(id),
            },
        }
    }
}

struct Hardware {
    registry: Arc<HidRegistry>,
    mux: Multiplexer,
    hotplug: Mutex<Option<Hotplug>>,
}

enum Mode {
    Files(Vec<Box<dyn CardSource>>),
    Hardware(Hardware),
}

/// Card reader front end: resolves which card, if any, each logical unit
/// sees on every poll.
pub struct CardReader {
    config: AimeConfig,
    key: Arc<dyn KeyState>,
    mode: Mode,
    presence: Mutex<Vec<Presence>>,
}

impl CardReader {
    /// File based emulation gated by the scan hotkey.
    pub fn new(config: AimeConfig, key: Arc<dyn KeyState>) -> Self {
        let sources = file_sources(&config);
        Self::with_mode(config, key, Mode::Files(sources))
    }

    /// Live HID readers through `backend`.
    pub fn with_hid_backend(
        config: AimeConfig,
        key: Arc<dyn KeyState>,
        backend: Arc<dyn HidBackend>,
    ) -> Self {
        let hardware = Hardware {
            registry: Arc::new(HidRegistry::new(backend)),
            mux: Multiplexer::new(),
            hotplug: Mutex::new(None),
        };
        Self::with_mode(config, key, Mode::Hardware(hardware))
    }

    /// Pick the mode `config.use_hardware` asks for.
    pub fn from_config(
        config: AimeConfig,
        key: Arc<dyn KeyState>,
        backend: Option<Arc<dyn HidBackend>>,
    ) -> Result<Self> {
        match (config.use_hardware, backend) {
            (false, _) => Ok(Self::new(config, key)),
            (true, Some(backend)) => Ok(Self::with_hid_backend(config, key, backend)),
            (true, None) => Err(Error::Init(
                "hardware card reader mode needs a HID backend".into(),
            )),
        }
    }

    fn with_mode(config: AimeConfig, key: Arc<dyn KeyState>, mode: Mode) -> Self {
        Self {
            config,
            key,
            mode,
            presence: Mutex::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &AimeConfig {
        &self.config
    }

    pub fn uses_hardware(&self) -> bool {
        matches!(self.mode, Mode::Hardware(_))
    }

    /// Device registry, in hardware mode.
    pub fn registry(&self) -> Option<&Arc<HidRegistry>> {
        match &self.mode {
            Mode::Hardware(hw) => Some(&hw.registry),
            Mode::Files(_) => None,
        }
    }

    /// Known logical unit count, in hardware mode.
    pub fn unit_count(&self) -> Option<usize> {
        match &self.mode {
            Mode::Hardware(hw) => Some(hw.mux.unit_count()),
            Mode::Files(_) => None,
        }
    }

    /// Hardware mode: register present readers and start listening for
    /// hotplug events. Calling it again only rescans.
    pub fn init(&self) -> Result<()> {
        let Mode::Hardware(hw) = &self.mode else {
            debug!("card reader using ID files");
            return Ok(());
        };

        info!("initializing HID card reader");
        hw.registry.scan()?;

        let mut hotplug = hw.hotplug.lock().unwrap_or_else(|p| p.into_inner());
        if hotplug.is_none() {
            *hotplug = Some(Hotplug::start(Arc::clone(&hw.registry))?);
        }
        Ok(())
    }

    /// Where the platform's device notifications should be sent.
    pub fn hotplug_notifier(&self) -> Option<HotplugNotifier> {
        let Mode::Hardware(hw) = &self.mode else {
            return None;
        };
        hw.hotplug
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .as_ref()
            .and_then(Hotplug::notifier)
    }

    /// Stop hotplug handling and release every device.
    pub fn fini(&self) {
        if let Mode::Hardware(hw) = &self.mode {
            let hotplug = hw.hotplug.lock().unwrap_or_else(|p| p.into_inner()).take();
            if let Some(hotplug) = hotplug {
                hotplug.stop();
            }
            hw.registry.close();
            debug!("HID card reader closed");
        }
    }

    /// Look for a card on `unit`. Always returns; "no card" is a normal
    /// steady state.
    pub fn poll(&self, unit: UnitNo) -> CardType {
        let found = match &self.mode {
            Mode::Files(sources) => self.poll_files(sources, unit),
            Mode::Hardware(hw) => poll_hardware(hw, unit),
        };

        let presence = found.map(Presence::from_card).unwrap_or_default();
        let mut all = self.presence.lock().unwrap_or_else(|p| p.into_inner());
        if all.len() <= unit.index() {
            all.resize(unit.index() + 1, Presence::default());
        }
        all[unit.index()] = presence;

        found.map_or(CardType::None, |c| c.card_type())
    }

    fn poll_files(&self, sources: &[Box<dyn CardSource>], unit: UnitNo) -> Option<ResolvedCard> {
        if unit != UnitNo::PRIMARY || !self.key.is_held(self.config.scan_key) {
            return None;
        }
        resolve_first(sources)
    }

    fn presence(&self, unit: UnitNo) -> Presence {
        self.presence
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get(unit.index())
            .copied()
            .unwrap_or_default()
    }

    pub fn aime_id(&self, unit: UnitNo) -> Result<AimeId> {
        self.presence(unit).aime.ok_or(Error::CardNotPresent)
    }

    pub fn felica_id(&self, unit: UnitNo) -> Result<FelicaId> {
        self.presence(unit).felica.ok_or(Error::CardNotPresent)
    }
}

impl Drop for CardReader {
    fn drop(&mut self) {
        self.fini();
    }
}

/// Poll the unit's devices and read the first one with a card, all under
/// one pool lock so the device cannot go away in between.
fn poll_hardware(hw: &Hardware, unit: UnitNo) -> Option<ResolvedCard> {
    let mut pool = hw.registry.lock();
    let slot = hw.mux.poll_unit(&mut pool, unit)?;
    let ctx = &mut pool[slot];

    let card = match ctx.read() {
        CardType::Iso15693 => {
            let id = AimeId::try_from(&ctx.usage_value()[..AIME_ID_LEN]).ok()?;
            ResolvedCard::Aime(id)
        }
        CardType::Iso18092 => {
            let id = FelicaId::try_from(&ctx.usage_value()[..FELICA_ID_LEN]).ok()?;
            ResolvedCard::Felica(id)
        }
        CardType::None => {
            warn!("unit {}: unrecognized card in slot {}", unit, slot);
            return None;
        }
    };

    info!(
        "unit {}: found {} card in slot {}",
        unit,
        card.card_type().name(),
        slot
    );
    Some(card)
}
