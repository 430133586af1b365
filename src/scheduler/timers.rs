//! Timer heap of the scheduler.
//!
//! Holds one entry per task whose condition is [`WakeupCondition::Timer`], ordered by the
//! instant it expires at. The scheduler pops expired entries at the start of every tick
//! and asks for the earliest remaining deadline to decide how long it may idle.
//!
//! [`WakeupCondition::Timer`]: crate::WakeupCondition::Timer

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

/// A registered deadline.
///
/// Entries with the same deadline come out in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimerEntry {
    at: Instant,
    seq: u64,
    slot: usize,
}

impl Ord for TimerEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at
            .cmp(&other.at)
            .then_with(|| self.seq.cmp(&other.seq))
            .then_with(|| self.slot.cmp(&other.slot))
    }
}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-heap of task deadlines.
///
/// Allocated once with room for every slot of the pool. A task is in at most one of the
/// scheduler's structures, so the heap never needs to grow.
pub(crate) struct TimerQueue {
    heap: BinaryHeap<Reverse<TimerEntry>>,
    next_seq: u64,
}

impl TimerQueue {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Registers the task in `slot` to wake up at `at`.
    pub(crate) fn register(&mut self, at: Instant, slot: usize) {
        debug_assert!(
            self.heap.len() < self.heap.capacity(),
            "timer heap outgrew the task pool"
        );

        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);

        self.heap.push(Reverse(TimerEntry { at, seq, slot }));
    }

    /// Removes and returns the slot of the earliest entry if it expired at `now`.
    pub(crate) fn pop_expired(&mut self, now: Instant) -> Option<usize> {
        let Reverse(next) = self.heap.peek()?;
        if next.at > now {
            return None;
        }

        self.heap.pop().map(|Reverse(entry)| entry.slot)
    }

    /// The earliest registered deadline.
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|Reverse(entry)| entry.at)
    }

    /// Time left until the earliest deadline, zero if it already passed.
    pub(crate) fn next_remaining(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|at| at.saturating_duration_since(now))
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
