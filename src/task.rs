//! Scheduler-side task records.
//!
//! A [`Task`] pairs a registered procedure with the condition it returned from its last
//! step. The scheduler owns the procedure for as long as the task lives, so there is no
//! way to drop, move or step it behind the scheduler's back.
//!
//! # How Tasks Work
//!
//! 1. A procedure is initialised and moved into a free slot of the task pool
//! 2. The task starts with [`WakeupCondition::Immediate`] in the ready/event set
//! 3. Each time its condition holds, the scheduler steps it once
//! 4. The returned condition decides where the task is kept next: the timer heap, the
//!    ready/event set, or nowhere once it finished
//! 5. A finished task is dropped and its slot becomes free again

use crate::condition::WakeupCondition;
use crate::coroutine::{Context, Resumable};
use crate::time::Clock;

use std::fmt;
use std::time::Instant;

/// Handle to a registered task.
///
/// Returned by [`Scheduler::add_task`](crate::Scheduler::add_task). The generation makes a
/// handle to a task that finished stale even after its slot has been reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    pub(crate) slot: usize,
    pub(crate) generation: u32,
}

impl TaskId {
    /// Index of the pool slot the task occupies.
    pub fn slot(&self) -> usize {
        self.slot
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}.{}", self.slot, self.generation)
    }
}

/// Where a task goes after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    Timers(Instant),
    Ready,
    Retire,
}

pub(crate) struct Task {
    procedure: Box<dyn Resumable>,
    pub(crate) condition: WakeupCondition,
    // Tick of the last step; a task is stepped at most once per tick.
    pub(crate) last_tick: Option<u64>,
}

impl Task {
    pub(crate) fn new(procedure: Box<dyn Resumable>) -> Self {
        Self {
            procedure,
            condition: WakeupCondition::immediate(),
            last_tick: None,
        }
    }

    pub(crate) fn stepped_in(&self, tick: u64) -> bool {
        self.last_tick == Some(tick)
    }

    /// Steps the procedure once and stores the condition it returned.
    pub(crate) fn step(&mut self, tick: u64, clock: &dyn Clock) -> Placement {
        debug_assert!(
            !self.condition.is_finished(),
            "finished task stepped again"
        );

        self.last_tick = Some(tick);

        let mut cx = Context::new(clock);
        let condition = self.procedure.step(&mut cx);
        log::trace!("tick {tick}: stepped, now waiting on {condition:?}");

        let placement = match &condition {
            WakeupCondition::Timer { at } => Placement::Timers(*at),
            WakeupCondition::Immediate | WakeupCondition::Event(_) => Placement::Ready,
            WakeupCondition::Finished => Placement::Retire,
        };

        self.condition = condition;
        placement
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("condition", &self.condition)
            .field("last_tick", &self.last_tick)
            .finish_non_exhaustive()
    }
}
