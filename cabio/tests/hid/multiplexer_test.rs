#[path = "../common/mod.rs"]
mod common;

use cabio::hid::{Multiplexer, ScriptedRead};
use cabio::test_support::registry_with_readers;
use cabio::UnitNo;

/// Which readers saw a poll since the last call.
fn polled(readers: &[cabio::hid::MockReader], before: &mut Vec<usize>) -> Vec<usize> {
    let now: Vec<usize> = readers.iter().map(|r| r.polls()).collect();
    let hit = now
        .iter()
        .zip(before.iter())
        .enumerate()
        .filter(|(_, (n, b))| n > b)
        .map(|(i, _)| i)
        .collect();
    *before = now;
    hit
}

#[test]
fn units_stripe_across_devices_and_restripe_on_growth() {
    let (_, readers, registry) = registry_with_readers(&["d0", "d1", "d2", "d3"]).unwrap();
    let mux = Multiplexer::new();
    let mut seen = vec![0; readers.len()];

    // the game polls units 0 and 1, so two units are known
    mux.observe(UnitNo::from(1));
    assert_eq!(mux.unit_count(), 2);

    registry.with_pool(|pool| mux.poll_unit(pool, UnitNo::from(0)));
    assert_eq!(polled(&readers, &mut seen), vec![0, 2]);

    registry.with_pool(|pool| mux.poll_unit(pool, UnitNo::from(1)));
    assert_eq!(polled(&readers, &mut seen), vec![1, 3]);

    registry.with_pool(|pool| mux.poll_unit(pool, UnitNo::from(2)));
    assert_eq!(mux.unit_count(), 3);
    assert_eq!(polled(&readers, &mut seen), vec![2]);

    registry.with_pool(|pool| mux.poll_unit(pool, UnitNo::from(0)));
    assert_eq!(polled(&readers, &mut seen), vec![0, 3]);
}

#[test]
fn first_ready_device_short_circuits() {
    let (_, readers, registry) = registry_with_readers(&["d0", "d1", "d2"]).unwrap();
    readers[1].push(ScriptedRead::Complete(
        cabio::hid::MockReader::felica_report(&[1, 2, 3, 4, 5, 6, 7, 8]),
    ));
    let mux = Multiplexer::new();

    let ready = registry.with_pool(|pool| mux.poll_unit(pool, UnitNo::PRIMARY));
    assert_eq!(ready, Some(1));
    assert_eq!(readers[2].polls(), 0);
}

#[test]
fn free_slots_are_skipped() {
    let (_, readers, registry) = registry_with_readers(&["d0", "d1"]).unwrap();
    assert!(registry.remove("d0"));
    let mux = Multiplexer::new();

    assert_eq!(registry.with_pool(|pool| mux.poll_unit(pool, UnitNo::PRIMARY)), None);
    assert_eq!(readers[0].polls(), 0);
    assert_eq!(readers[1].polls(), 1);
}
