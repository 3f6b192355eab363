// cabio/src/card/id_file.rs

//! Card ID text files: fixed-width IDs stored as two-digit hex pairs.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::debug;

use crate::types::FelicaId;
use crate::utils::{bytes_to_hex_spaced_upper, parse_hex_pairs};
use crate::{Error, Result};

fn id_file_error(path: &Path, reason: impl Into<String>) -> Error {
    Error::IdFile {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

/// Read an `N` byte ID from `path`.
///
/// `Ok(None)` when the file does not exist; malformed or short content is
/// an [`Error::IdFile`], any other filesystem failure an [`Error::Io`].
pub fn read_id_file<const N: usize>(path: &Path) -> Result<Option<[u8; N]>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let bytes = parse_hex_pairs(&text, N).map_err(|reason| id_file_error(path, reason))?;
    let mut id = [0u8; N];
    id.copy_from_slice(&bytes);
    Ok(Some(id))
}

/// Write `id` as space separated uppercase hex pairs and a newline,
/// creating missing parent directories.
pub fn write_id_file(path: &Path, id: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let mut text = bytes_to_hex_spaced_upper(id);
    text.push('\n');
    fs::write(path, text)?;
    debug!("wrote card id file {}", path.display());
    Ok(())
}

/// Random FeliCa IDm. The high nibble of the first byte is always zero.
pub fn generate_felica_id() -> FelicaId {
    let mut bytes = rand::random::<u64>().to_be_bytes();
    bytes[0] &= 0x0F;
    FelicaId::from_bytes(bytes)
}
