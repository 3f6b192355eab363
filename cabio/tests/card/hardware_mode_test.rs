#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use cabio::card::{CardReader, FixedKey};
use cabio::config::AimeConfig;
use cabio::hid::{HidBackend, MockHidBackend, MockReader, ScriptedRead};
use cabio::{CardType, Error, UnitNo};
use common::fixtures;

fn hardware_reader(backend: Arc<MockHidBackend>) -> CardReader {
    let cfg = AimeConfig {
        use_hardware: true,
        ..AimeConfig::default()
    };
    let backend: Arc<dyn HidBackend> = backend;
    CardReader::from_config(cfg, Arc::new(FixedKey(false)), Some(backend)).unwrap()
}

#[test]
fn pending_read_then_aime_card() {
    common::init_logging();
    let backend = Arc::new(MockHidBackend::new());
    let device = MockReader::new();
    device.push(ScriptedRead::Pending);
    device.push(ScriptedRead::Waiting);
    device.push(ScriptedRead::Complete(MockReader::aime_report(
        &fixtures::sample_aime_id(),
    )));
    backend.attach("reader", device);

    let reader = hardware_reader(backend);
    reader.init().unwrap();
    assert!(reader.uses_hardware());

    assert_eq!(reader.poll(UnitNo::PRIMARY), CardType::None);
    assert_eq!(reader.poll(UnitNo::PRIMARY), CardType::None);
    assert_eq!(reader.poll(UnitNo::PRIMARY), CardType::Iso15693);
    assert_eq!(
        reader.aime_id(UnitNo::PRIMARY).unwrap().as_bytes(),
        &fixtures::sample_aime_id()
    );
    assert!(matches!(
        reader.felica_id(UnitNo::PRIMARY),
        Err(Error::CardNotPresent)
    ));

    reader.fini();
}

#[test]
fn felica_card_on_second_unit() {
    let backend = Arc::new(MockHidBackend::new());
    let first = MockReader::new();
    let second = MockReader::new();
    second.push(ScriptedRead::Complete(MockReader::felica_report(
        &fixtures::sample_felica_id(),
    )));
    backend.attach("r0", first);
    backend.attach("r1", second);

    let reader = hardware_reader(backend);
    reader.init().unwrap();

    assert_eq!(reader.poll(UnitNo::from(1)), CardType::Iso18092);
    assert_eq!(reader.unit_count(), Some(2));
    assert_eq!(
        reader.felica_id(UnitNo::from(1)).unwrap().as_bytes(),
        &fixtures::sample_felica_id()
    );
    // presence is tracked per unit
    assert!(reader.felica_id(UnitNo::PRIMARY).is_err());
}

#[test]
fn read_error_reports_no_card() {
    let backend = Arc::new(MockHidBackend::new());
    let device = MockReader::new();
    device.push(ScriptedRead::Error);
    backend.attach("reader", device);

    let reader = hardware_reader(backend);
    reader.init().unwrap();
    assert_eq!(reader.poll(UnitNo::PRIMARY), CardType::None);
}

#[test]
fn hotplugged_reader_is_polled() {
    let backend = Arc::new(MockHidBackend::new());
    let reader = hardware_reader(backend.clone());
    reader.init().unwrap();
    assert_eq!(reader.registry().unwrap().device_count(), 0);

    let device = MockReader::new();
    device.push(ScriptedRead::Complete(MockReader::aime_report(
        &fixtures::sample_aime_id(),
    )));
    backend.attach("late", device);
    reader.hotplug_notifier().unwrap().arrived("late").unwrap();

    let registry = reader.registry().unwrap();
    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(2);
    while registry.device_count() == 0 && std::time::Instant::now() < deadline {
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
    assert_eq!(reader.poll(UnitNo::PRIMARY), CardType::Iso15693);
}

#[test]
fn failed_enumeration_is_init_error() {
    let backend = Arc::new(MockHidBackend::new());
    backend.set_fail_enumerate(true);
    let reader = hardware_reader(backend);
    assert!(matches!(reader.init(), Err(Error::Init(_))));
}
