#[path = "../common/mod.rs"]
mod common;

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use cabio::card::{CardReader, FixedKey, read_id_file};
use cabio::config::AimeConfig;
use cabio::constants::VK_RETURN;
use cabio::{CardType, Error, UnitNo};
use common::fixtures;
use tempfile::tempdir;

fn config(dir: &Path, felica_gen: bool) -> AimeConfig {
    AimeConfig {
        aime_path: dir.join("aime.txt"),
        felica_path: dir.join("felica.txt"),
        felica_gen,
        ..AimeConfig::default()
    }
}

#[test]
fn aime_file_wins_over_felica_file() {
    common::init_logging();
    let dir = tempdir().unwrap();
    let cfg = config(dir.path(), true);
    // the FeliCa file is written last and is newer
    fs::write(&cfg.aime_path, fixtures::aime_file_text()).unwrap();
    thread::sleep(Duration::from_millis(10));
    fs::write(&cfg.felica_path, fixtures::felica_file_text()).unwrap();

    let reader = CardReader::new(cfg, Arc::new(FixedKey(true)));
    assert_eq!(reader.poll(UnitNo::PRIMARY), CardType::Iso15693);
    assert_eq!(
        reader.aime_id(UnitNo::PRIMARY).unwrap().as_bytes(),
        &fixtures::sample_aime_id()
    );
    assert!(matches!(
        reader.felica_id(UnitNo::PRIMARY),
        Err(Error::CardNotPresent)
    ));
}

#[test]
fn felica_file_used_when_no_aime_file() {
    let dir = tempdir().unwrap();
    let cfg = config(dir.path(), true);
    fs::write(&cfg.felica_path, fixtures::felica_file_text()).unwrap();

    let reader = CardReader::new(cfg, Arc::new(FixedKey(true)));
    assert_eq!(reader.poll(UnitNo::PRIMARY), CardType::Iso18092);
    let id = reader.felica_id(UnitNo::PRIMARY).unwrap();
    assert_eq!(id.as_bytes(), &fixtures::sample_felica_id());
    assert_eq!(id.as_u64(), 0x012E_4CD8_A30A_3C75);
    assert!(reader.aime_id(UnitNo::PRIMARY).is_err());
}

#[test]
fn generated_felica_is_persisted_and_reused() {
    let dir = tempdir().unwrap();
    let cfg = config(dir.path(), true);
    let felica_path = cfg.felica_path.clone();

    let reader = CardReader::new(cfg, Arc::new(FixedKey(true)));
    assert_eq!(reader.poll(UnitNo::PRIMARY), CardType::Iso18092);
    let first = reader.felica_id(UnitNo::PRIMARY).unwrap();
    assert_eq!(first.as_bytes()[0] & 0xF0, 0);
    assert_eq!(read_id_file::<8>(&felica_path).unwrap(), Some(*first.as_bytes()));

    reader.poll(UnitNo::PRIMARY);
    assert_eq!(reader.felica_id(UnitNo::PRIMARY).unwrap(), first);
}

#[test]
fn no_files_and_no_generator_means_no_card() {
    let dir = tempdir().unwrap();
    let reader = CardReader::new(config(dir.path(), false), Arc::new(FixedKey(true)));
    assert_eq!(reader.poll(UnitNo::PRIMARY), CardType::None);
    assert!(reader.aime_id(UnitNo::PRIMARY).is_err());
    assert!(reader.felica_id(UnitNo::PRIMARY).is_err());
}

#[test]
fn scan_key_gates_file_cards() {
    let dir = tempdir().unwrap();
    let cfg = config(dir.path(), false);
    fs::write(&cfg.aime_path, fixtures::aime_file_text()).unwrap();

    let held = Arc::new(AtomicBool::new(false));
    let key_state = Arc::clone(&held);
    let reader = CardReader::new(
        cfg,
        Arc::new(move |vk: u8| vk == VK_RETURN && key_state.load(Ordering::SeqCst)),
    );

    assert_eq!(reader.poll(UnitNo::PRIMARY), CardType::None);
    held.store(true, Ordering::SeqCst);
    assert_eq!(reader.poll(UnitNo::PRIMARY), CardType::Iso15693);
    held.store(false, Ordering::SeqCst);
    assert_eq!(reader.poll(UnitNo::PRIMARY), CardType::None);
    assert!(reader.aime_id(UnitNo::PRIMARY).is_err());
}
