//! Wakeup conditions returned by every procedure step.
//!
//! A [`WakeupCondition`] tells the scheduler why and when a task becomes runnable again.
//! It is pure data: the scheduler reads it to decide whether the task belongs in the
//! timer heap or in the ready/event set.

use crate::event::EventFlag;

use std::time::{Duration, Instant};

/// Describes when a suspended task may be stepped again.
#[derive(Debug, Clone)]
pub enum WakeupCondition {
    /// The procedure has completed and is never stepped again.
    Finished,
    /// Runnable on the next poll pass, after its siblings had their turn.
    Immediate,
    /// Runnable once the monotonic clock reaches `at`.
    Timer { at: Instant },
    /// Runnable once the flag reads zero.
    Event(EventFlag),
}

impl WakeupCondition {
    pub fn finished() -> Self {
        WakeupCondition::Finished
    }

    /// The "yield" condition: run again on the next pass.
    pub fn immediate() -> Self {
        WakeupCondition::Immediate
    }

    pub fn event(flag: EventFlag) -> Self {
        WakeupCondition::Event(flag)
    }

    pub fn timer_at(at: Instant) -> Self {
        WakeupCondition::Timer { at }
    }

    /// Timer condition that expires `duration` after `now`.
    ///
    /// Procedures normally go through [`Context::sleep`](crate::Context::sleep), which
    /// reads `now` from the scheduler's clock. A deadline past what [`Instant`] can
    /// represent is clamped to a far-future one, so `Duration::MAX` sleeps forever.
    pub fn timer(now: Instant, duration: Duration) -> Self {
        WakeupCondition::Timer {
            at: saturating_deadline(now, duration),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, WakeupCondition::Finished)
    }

    pub fn is_timer(&self) -> bool {
        matches!(self, WakeupCondition::Timer { .. })
    }

    /// The instant a timer condition expires at, `None` for every other kind.
    pub fn deadline(&self) -> Option<Instant> {
        match self {
            WakeupCondition::Timer { at } => Some(*at),
            _ => None,
        }
    }

    /// Returns `true` if a task holding this condition may be stepped at `now`.
    pub fn is_runnable(&self, now: Instant) -> bool {
        match self {
            WakeupCondition::Finished => false,
            WakeupCondition::Immediate => true,
            WakeupCondition::Timer { at } => *at <= now,
            WakeupCondition::Event(flag) => flag.is_ready(),
        }
    }
}

fn saturating_deadline(now: Instant, mut duration: Duration) -> Instant {
    loop {
        if let Some(at) = now.checked_add(duration) {
            return at;
        }
        // halving converges: a zero duration always fits
        duration /= 2;
    }
}
