mod common;

use common::Probe;
use cosched::procs::Sleep;
use cosched::time::{Clock, MockClock};
use cosched::{Scheduler, SchedulerBuilder, WakeupCondition};
use std::time::{Duration, Instant};

#[test]
fn test_sleep_basic() {
    let mut scheduler = Scheduler::<1>::new();

    let start = Instant::now();
    scheduler
        .add_task(Sleep::new(), Duration::from_millis(50))
        .expect("empty pool should accept a task");
    scheduler.run_until_idle();
    let elapsed = start.elapsed();

    assert!(
        elapsed >= Duration::from_millis(50),
        "Sleep should wait at least the specified duration"
    );
}

#[test]
fn test_sleep_zero_duration() {
    let clock = MockClock::new();
    let mut scheduler = Scheduler::<1>::with_clock(clock.clone());

    scheduler
        .add_task(Sleep::new(), Duration::ZERO)
        .expect("empty pool should accept a task");
    let ticks = scheduler.run_until_idle();

    assert_eq!(ticks, 3, "Zero duration sleep should finish on the third tick");
    assert_eq!(clock.elapsed(), Duration::ZERO, "Nothing to idle for");
    assert!(clock.idles().is_empty(), "Zero duration sleep should never idle");
}

#[test]
fn test_sleep_suspends_twice_half_apart() {
    let clock = MockClock::new();
    let mut scheduler = Scheduler::<1>::with_clock(clock.clone());
    let total = Duration::from_millis(100);

    let (probe, log) = Probe::new(Sleep::new());
    scheduler.add_task(probe, total).expect("room for one task");
    scheduler.run_until_idle();

    let log = log.borrow();
    assert_eq!(log.len(), 3, "Sleep should be stepped exactly three times");

    let start = clock.start();
    assert_eq!(log[0].0, start);
    assert!(log[0].1.is_timer() && log[1].1.is_timer());
    assert!(log[2].1.is_finished());

    assert!(log[1].0 - log[0].0 >= total / 2, "First resumption came early");
    assert!(log[2].0 - log[1].0 >= total / 2, "Second resumption came early");
    assert!(log[2].0 - start >= total, "Finished before the full duration");

    assert_eq!(
        clock.idles(),
        vec![total / 2, total / 2],
        "Scheduler should idle exactly until each deadline"
    );
}

#[test]
fn test_sleep_odd_duration_never_short() {
    let clock = MockClock::new();
    let mut scheduler = Scheduler::<1>::with_clock(clock.clone());
    let total = Duration::from_nanos(3);

    scheduler.add_task(Sleep::new(), total).expect("room for one task");
    scheduler.run_until_idle();

    assert!(
        clock.elapsed() >= total,
        "Two halves of an odd duration should still add up to it"
    );
}

#[test]
fn test_timer_never_fires_early() {
    let clock = MockClock::new();
    let mut scheduler = Scheduler::<1>::with_clock(clock.clone());

    let (probe, log) = Probe::new(Sleep::new());
    let id = scheduler
        .add_task(probe, Duration::from_millis(20))
        .expect("room for one task");

    // first tick starts the sleep and idles until the deadline
    let tick = scheduler.tick();
    assert_eq!(tick.idle, Some(Duration::from_millis(10)));

    let deadline = scheduler
        .condition(id)
        .and_then(WakeupCondition::deadline)
        .expect("sleep should be waiting on a timer");
    assert!(clock.now() >= deadline);

    scheduler.tick();
    let log = log.borrow();
    assert_eq!(log.len(), 2);
    assert!(log[1].0 >= deadline, "Timer task stepped before its deadline");
}

#[test]
fn test_sleep_forever_does_not_overflow() {
    let now = Instant::now();
    let deadline = WakeupCondition::timer(now, Duration::MAX)
        .deadline()
        .expect("timer condition has a deadline");
    assert!(deadline > now);

    let clock = MockClock::new();
    let cap = Duration::from_secs(1);
    let mut scheduler = SchedulerBuilder::new()
        .clock(clock.clone())
        .max_idle(cap)
        .build::<1>();

    let id = scheduler
        .add_task(Sleep::new(), Duration::MAX)
        .expect("room for one task");
    for _ in 0..3 {
        let tick = scheduler.tick();
        assert_eq!(tick.idle, Some(cap), "Endless sleep should idle up to the cap");
    }

    assert!(scheduler.contains(id), "Endless sleep never finishes");
    let deadline = scheduler
        .condition(id)
        .and_then(WakeupCondition::deadline)
        .expect("sleep should be waiting on a timer");
    assert!(deadline > clock.now() + Duration::from_secs(60 * 60 * 24 * 365));
}
