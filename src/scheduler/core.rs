//! Cooperative scheduler that steps procedures whose wakeup condition holds.
//!
//! Tasks live in a fixed pool of `N` slots. Each occupied slot is in exactly one of two
//! structures, chosen by the condition its procedure returned last:
//!
//! - `Timer` tasks sit in a min-heap keyed by their deadline;
//! - `Immediate` and `Event` tasks sit in a linear ready/event set.
//!
//! One tick drains the expired timers, walks the ready/event set once, and then idles
//! until the next deadline if nothing can run before it.

use crate::builder::{Config, SchedulerBuilder};
use crate::condition::WakeupCondition;
use crate::coroutine::Procedure;
use crate::error::AddTaskError;
use crate::scheduler::ready::ReadySet;
use crate::scheduler::timers::TimerQueue;
use crate::task::{Placement, Task, TaskId};
use crate::time::{Clock, SystemClock};
use crate::utils::pool::TaskPool;

use std::time::{Duration, Instant};

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tick {
    /// Tasks stepped because their timer expired.
    pub timers_fired: usize,
    /// Tasks stepped from the ready/event set.
    pub ready_stepped: usize,
    /// Tasks that finished during this tick.
    pub finished: usize,
    /// How long the scheduler idled at the end of the tick.
    pub idle: Option<Duration>,
}

impl Tick {
    /// Total number of steps taken in this tick.
    pub fn stepped(&self) -> usize {
        self.timers_fired + self.ready_stepped
    }
}

/// Fixed-capacity cooperative scheduler.
///
/// Owns up to `N` procedures and runs them on the calling thread. The only blocking call
/// is the idle wait through the scheduler's [`Clock`].
pub struct Scheduler<const N: usize, C: Clock = SystemClock> {
    pool: TaskPool<N>,
    timers: TimerQueue,
    ready: ReadySet,
    // Timers that expired for tasks already stepped this tick.
    deferred: Vec<usize>,
    clock: C,
    config: Config,
    ticks: u64,
    last_now: Option<Instant>,
}

impl<const N: usize> Scheduler<N> {
    /// Creates a scheduler on the system clock with the default idle policy.
    ///
    /// # Example
    /// ```ignore
    /// let mut scheduler = Scheduler::<4>::new();
    /// ```
    pub fn new() -> Self {
        SchedulerBuilder::new().build()
    }

    /// Creates a scheduler on `clock` with the default idle policy.
    ///
    /// # Example
    /// ```ignore
    /// let mut scheduler = Scheduler::<4>::with_clock(MockClock::new());
    /// ```
    pub fn with_clock<C: Clock>(clock: C) -> Scheduler<N, C> {
        SchedulerBuilder::new().clock(clock).build()
    }
}

impl<const N: usize> Default for Scheduler<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, C: Clock> Scheduler<N, C> {
    pub(crate) fn from_parts(clock: C, config: Config) -> Self {
        Self {
            pool: TaskPool::new(),
            timers: TimerQueue::with_capacity(N),
            ready: ReadySet::with_capacity(N),
            deferred: Vec::with_capacity(N),
            clock,
            config,
            ticks: 0,
            last_now: None,
        }
    }

    /// Registers a procedure and starts it.
    ///
    /// Takes the first free slot, calls `procedure.init(args)` and queues the task to be
    /// stepped on the next tick. When every slot is taken the procedure is handed back in
    /// the error untouched and the scheduler is left as it was.
    ///
    /// # Example
    /// ```ignore
    /// let mut scheduler = Scheduler::<2>::new();
    /// let id = scheduler.add_task(Sleep::new(), Duration::from_millis(100))?;
    /// ```
    pub fn add_task<P>(&mut self, mut procedure: P, args: P::Args) -> Result<TaskId, AddTaskError<P>>
    where
        P: Procedure + 'static,
    {
        let Some(slot) = self.pool.vacant() else {
            log::warn!("task pool full, rejecting {}", std::any::type_name::<P>());
            return Err(AddTaskError::PoolFull {
                procedure,
                capacity: N,
            });
        };

        procedure.init(args);
        let id = self.pool.insert(slot, Task::new(Box::new(procedure)));
        self.ready.push(slot);

        log::debug!("registered {id} ({})", std::any::type_name::<P>());
        Ok(id)
    }

    /// Runs the poll loop forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.tick();
        }
    }

    /// Runs ticks until every task finished and returns how many ticks it took.
    ///
    /// Never returns while a task waits on an event that is never signaled.
    pub fn run_until_idle(&mut self) -> u64 {
        let start = self.ticks;
        while !self.is_empty() {
            self.tick();
        }
        self.ticks - start
    }

    /// Runs a single iteration of the poll loop.
    ///
    /// # Panics
    ///
    /// Panics if the clock reports an instant earlier than the one of the previous tick.
    pub fn tick(&mut self) -> Tick {
        let tick = self.ticks;
        self.ticks += 1;

        let now = self.clock.now();
        if let Some(last) = self.last_now {
            assert!(
                now >= last,
                "clock went backwards by {:?}",
                last.duration_since(now)
            );
        }
        self.last_now = Some(now);

        let mut report = Tick::default();

        self.fire_timers(tick, now, &mut report);
        self.poll_ready(tick, now, &mut report);

        report.idle = self.idle_for(now);
        if let Some(duration) = report.idle {
            log::debug!("tick {tick}: idling for {duration:?}");
            self.clock.idle(duration);
        }

        report
    }

    /// Steps every task whose timer expired at `now`, earliest first.
    fn fire_timers(&mut self, tick: u64, now: Instant, report: &mut Tick) {
        while let Some(slot) = self.timers.pop_expired(now) {
            let Some(task) = self.pool.get_mut(slot) else {
                unreachable!("timer registered for empty slot {slot}");
            };
            debug_assert!(task.condition.is_timer(), "non-timer task in timer heap");

            // A zero-length sleep can expire again right away; it waits for the next tick.
            if task.stepped_in(tick) {
                self.deferred.push(slot);
                continue;
            }

            let placement = task.step(tick, &self.clock);
            report.timers_fired += 1;

            match placement {
                Placement::Timers(at) => self.timers.register(at, slot),
                Placement::Ready => self.ready.push(slot),
                Placement::Retire => self.retire(slot, report),
            }
        }

        for slot in self.deferred.drain(..) {
            let at = self
                .pool
                .get(slot)
                .and_then(|task| task.condition.deadline());
            if let Some(at) = at {
                self.timers.register(at, slot);
            }
        }
    }

    /// Walks the ready/event set once, stepping every runnable task.
    fn poll_ready(&mut self, tick: u64, now: Instant, report: &mut Tick) {
        let mut index = 0;
        while index < self.ready.len() {
            let slot = self.ready.get(index);
            let Some(task) = self.pool.get_mut(slot) else {
                unreachable!("ready set holds empty slot {slot}");
            };

            if task.stepped_in(tick) || !task.condition.is_runnable(now) {
                index += 1;
                continue;
            }

            let placement = task.step(tick, &self.clock);
            report.ready_stepped += 1;

            match placement {
                Placement::Ready => index += 1,
                Placement::Timers(at) => {
                    self.ready.swap_remove(index);
                    self.timers.register(at, slot);
                }
                Placement::Retire => {
                    self.ready.swap_remove(index);
                    self.retire(slot, report);
                }
            }
        }
    }

    fn retire(&mut self, slot: usize, report: &mut Tick) {
        if self.pool.remove(slot).is_some() {
            log::debug!("task in slot {slot} finished");
            report.finished += 1;
        }
    }

    /// How long the process may block before the next tick.
    fn idle_for(&self, now: Instant) -> Option<Duration> {
        // a yielded task, or one whose event fired while the timers were drained,
        // wants the very next pass
        let wants_pass = self.ready.iter().any(|slot| {
            self.pool
                .get(slot)
                .is_some_and(|task| task.condition.is_runnable(now))
        });
        if wants_pass {
            return None;
        }

        let idle = match self.timers.next_remaining(now) {
            Some(remaining) if remaining.is_zero() => return None,
            Some(remaining) => remaining,
            None if self.ready.is_empty() => return None,
            None => self.config.event_poll_interval?,
        };

        Some(match self.config.max_idle {
            Some(max) => idle.min(max),
            None => idle,
        })
    }

    /// The condition a task is currently waiting on, `None` once it finished.
    pub fn condition(&self, id: TaskId) -> Option<&WakeupCondition> {
        self.pool.lookup(id).map(|task| &task.condition)
    }

    /// Returns `true` while the task has not finished.
    pub fn contains(&self, id: TaskId) -> bool {
        self.pool.lookup(id).is_some()
    }

    /// Number of tasks that have not finished.
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.pool.len() == N
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of tasks currently waiting on a timer.
    pub fn timers_pending(&self) -> usize {
        self.timers.len()
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
