mod common;

use common::{Probe, SharedBuf};
use cosched::procs::PeriodicPrint;
use cosched::time::MockClock;
use cosched::{Scheduler, WakeupCondition};
use std::time::Duration;

const PERIOD: Duration = Duration::from_millis(100);

#[test]
fn test_periodic_print_order() {
    let clock = MockClock::new();
    let mut scheduler = Scheduler::<1>::with_clock(clock.clone());
    let out = SharedBuf::new();

    scheduler
        .add_task(PeriodicPrint::new("c1", out.clone()), PERIOD)
        .expect("room for one task");

    while out.lines().len() < 6 {
        scheduler.tick();
        assert!(scheduler.ticks() < 100, "Printer stopped making progress");
    }

    assert_eq!(
        out.lines(),
        vec![
            "c1: 0",
            "c1 post yield",
            "c1: 1",
            "c1 post yield",
            "c1: 2",
            "c1 post yield",
        ]
    );
    assert!(clock.elapsed() >= PERIOD * 3, "Three periods should have passed");
}

#[test]
fn test_yield_splits_print_and_post_yield() {
    let clock = MockClock::new();
    let mut scheduler = Scheduler::<1>::with_clock(clock.clone());
    let out = SharedBuf::new();

    let (probe, log) = Probe::new(PeriodicPrint::new("c1", out.clone()));
    scheduler.add_task(probe, PERIOD).expect("room for one task");

    let mut seen = 0;
    while seen < 4 {
        scheduler.tick();
        let lines = out.lines();
        let new = &lines[seen..];
        assert!(new.len() <= 1, "One step prints at most one line, got {new:?}");
        seen = lines.len();
    }

    // every print step ends in a yield, every post-yield step ends on a timer
    let log = log.borrow();
    let immediates = log
        .iter()
        .filter(|(_, condition)| matches!(condition, WakeupCondition::Immediate))
        .count();
    assert_eq!(immediates, 2, "Each print should be followed by exactly one yield");
}

#[test]
fn test_parent_waits_for_embedded_sleep() {
    let clock = MockClock::new();
    let mut scheduler = Scheduler::<1>::with_clock(clock.clone());
    let out = SharedBuf::new();

    scheduler
        .add_task(PeriodicPrint::new("c1", out.clone()), PERIOD)
        .expect("room for one task");

    // starts the sleep, then resumes it at half the period
    scheduler.tick();
    scheduler.tick();
    assert!(clock.elapsed() < PERIOD + PERIOD / 2);
    assert!(
        out.lines().is_empty(),
        "Nothing may be printed before the embedded sleep finished"
    );

    scheduler.tick();
    assert_eq!(out.lines(), vec!["c1: 0"]);
    assert_eq!(clock.elapsed(), PERIOD);
}

#[test]
fn test_two_printers_interleave() {
    let clock = MockClock::new();
    let mut scheduler = Scheduler::<2>::with_clock(clock.clone());
    let fast = SharedBuf::new();
    let slow = SharedBuf::new();

    scheduler
        .add_task(PeriodicPrint::new("fast", fast.clone()), PERIOD)
        .expect("room for two tasks");
    scheduler
        .add_task(PeriodicPrint::new("slow", slow.clone()), PERIOD * 3)
        .expect("room for two tasks");

    while clock.elapsed() < PERIOD * 6 {
        scheduler.tick();
    }
    // let the last round's yields complete
    scheduler.tick();

    let fast_prints = fast.lines().iter().filter(|l| !l.ends_with("post yield")).count();
    let slow_prints = slow.lines().iter().filter(|l| !l.ends_with("post yield")).count();
    assert_eq!(fast_prints, 6);
    assert_eq!(slow_prints, 2);
}
