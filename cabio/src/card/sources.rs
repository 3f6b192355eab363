// cabio/src/card/sources.rs

use std::path::PathBuf;

use log::{info, warn};

use crate::card::id_file::{generate_felica_id, read_id_file, write_id_file};
use crate::config::AimeConfig;
use crate::constants::{AIME_ID_LEN, FELICA_ID_LEN};
use crate::types::{AimeId, CardType, FelicaId};

/// A card found by one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedCard {
    Aime(AimeId),
    Felica(FelicaId),
}

impl ResolvedCard {
    pub fn card_type(&self) -> CardType {
        match self {
            ResolvedCard::Aime(_) => CardType::Iso15693,
            ResolvedCard::Felica(_) => CardType::Iso18092,
        }
    }
}

/// One way of producing an emulated card. `None` means try the next source.
pub trait CardSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn resolve(&self) -> Option<ResolvedCard>;
}

/// AiMe access code from a text file.
#[derive(Debug, Clone)]
pub struct AimeFile {
    pub path: PathBuf,
}

impl CardSource for AimeFile {
    fn name(&self) -> &'static str {
        "aime file"
    }

    fn resolve(&self) -> Option<ResolvedCard> {
        match read_id_file::<AIME_ID_LEN>(&self.path) {
            Ok(id) => id.map(|b| ResolvedCard::Aime(AimeId::from_bytes(b))),
            Err(e) => {
                warn!("cannot read {}: {}", self.path.display(), e);
                None
            }
        }
    }
}

/// FeliCa IDm from a text file.
#[derive(Debug, Clone)]
pub struct FelicaFile {
    pub path: PathBuf,
}

impl CardSource for FelicaFile {
    fn name(&self) -> &'static str {
        "felica file"
    }

    fn resolve(&self) -> Option<ResolvedCard> {
        match read_id_file::<FELICA_ID_LEN>(&self.path) {
            Ok(id) => id.map(|b| ResolvedCard::Felica(FelicaId::from_bytes(b))),
            Err(e) => {
                warn!("cannot read {}: {}", self.path.display(), e);
                None
            }
        }
    }
}

/// Fresh random FeliCa IDm, saved to `path` so later scans find it.
#[derive(Debug, Clone)]
pub struct FelicaGenerator {
    pub path: PathBuf,
}

impl CardSource for FelicaGenerator {
    fn name(&self) -> &'static str {
        "felica generator"
    }

    fn resolve(&self) -> Option<ResolvedCard> {
        let id = generate_felica_id();
        if let Err(e) = write_id_file(&self.path, id.as_bytes()) {
            warn!("cannot save generated ID to {}: {}", self.path.display(), e);
            return None;
        }
        info!("generated random FeliCa ID {}", id.to_hex());
        Some(ResolvedCard::Felica(id))
    }
}

/// Sources in priority order for file based emulation.
pub fn file_sources(config: &AimeConfig) -> Vec<Box<dyn CardSource>> {
    let mut sources: Vec<Box<dyn CardSource>> = vec![
        Box::new(AimeFile {
            path: config.aime_path.clone(),
        }),
        Box::new(FelicaFile {
            path: config.felica_path.clone(),
        }),
    ];
    if config.felica_gen {
        sources.push(Box::new(FelicaGenerator {
            path: config.felica_path.clone(),
        }));
    }
    sources
}

/// First card any source produces.
pub fn resolve_first(sources: &[Box<dyn CardSource>]) -> Option<ResolvedCard> {
    sources.iter().find_map(|s| s.resolve())
}
