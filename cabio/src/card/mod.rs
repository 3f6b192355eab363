// cabio/src/card/mod.rs

//! Card presence: which card, if any, the game sees on each poll.

pub mod id_file;
pub mod resolver;
pub mod sources;

pub use id_file::{generate_felica_id, read_id_file, write_id_file};
pub use resolver::{CardReader, FixedKey, KeyState};
pub use sources::{
    AimeFile, CardSource, FelicaFile, FelicaGenerator, ResolvedCard, file_sources, resolve_first,
};
