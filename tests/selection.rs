//! End-to-end selection runs through the public API.

use rollcall::{
    ManualClock, PickError, PickEvent, Picker, Roster, RosterStore, RunOutcome, SeededSampler,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

fn picker(seed: u64) -> Picker {
    Picker::new()
        .with_clock(Arc::new(ManualClock::new()))
        .with_sampler(Arc::new(SeededSampler::new(seed)))
}

#[test]
fn test_class_of_three() {
    let roster = Roster::from_names(["Ana", "Bo", "Cy"]);
    let allowed: HashSet<_> = roster.iter().map(str::to_string).collect();

    let (handle, rx) = picker(1).start_events(&roster).unwrap();
    let outcome = handle.join().unwrap();

    let events: Vec<_> = rx.iter().collect();
    let ticks = events
        .iter()
        .filter(|e| matches!(e, PickEvent::Tick(_)))
        .count();
    assert!(ticks >= 1);
    assert_eq!(events.iter().filter(|e| e.is_final()).count(), 1);
    assert!(events.last().unwrap().is_final());

    let RunOutcome::Picked(name) = outcome else {
        panic!("run was cancelled");
    };
    assert!(allowed.contains(&name));
}

#[test]
fn test_every_name_eventually_shows() {
    let roster = Roster::from_names(["Ana", "Bo", "Cy", "Di"]);
    let (handle, rx) = picker(99).start_events(&roster).unwrap();
    handle.join().unwrap();

    let shown: HashSet<String> = rx
        .iter()
        .filter_map(|e| match e {
            PickEvent::Tick(tick) => Some(tick.name),
            _ => None,
        })
        .collect();
    assert_eq!(shown.len(), 4);
}

#[test]
fn test_runs_are_repeatable_with_a_seed() {
    let roster = Roster::from_names(["Ana", "Bo", "Cy", "Di", "Eve"]);

    let outcomes: Vec<_> = (0..2)
        .map(|_| {
            let (handle, rx) = picker(5).start_events(&roster).unwrap();
            handle.join().unwrap();
            rx.iter().collect::<Vec<_>>()
        })
        .collect();
    assert_eq!(outcomes[0], outcomes[1]);
}

#[test]
fn test_tick_count_matches_duration() {
    let roster = Roster::from_names(["Ana", "Bo"]);
    let (handle, rx) = picker(3).start_events(&roster).unwrap();
    handle.join().unwrap();

    let intervals: Vec<Duration> = rx
        .iter()
        .filter_map(|e| match e {
            PickEvent::Tick(tick) => Some(tick.interval),
            _ => None,
        })
        .collect();
    let total: Duration = intervals.iter().sum();
    let longest = *intervals.iter().max().unwrap();

    let seven = Duration::from_secs(7);
    assert!(total >= seven);
    assert!(total < seven + longest);
}

#[test]
fn test_saved_roster_drives_a_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = RosterStore::new(dir.path().join("students.json"));
    store.save(&Roster::from_names(["Ana", "Bo"])).unwrap();

    let roster = store.load_or_default();
    let outcome = picker(8)
        .start(&roster, |_| {}, |_| {})
        .unwrap()
        .join()
        .unwrap();
    assert!(matches!(outcome.name(), Some("Ana" | "Bo")));
}

#[test]
fn test_cleared_roster_cannot_start() {
    let mut roster = Roster::from_names(["Ana"]);
    roster.clear();

    let result = picker(0).start(&roster, |_| panic!("no ticks"), |_| panic!("no result"));
    assert!(matches!(result, Err(PickError::EmptyRoster)));
}
