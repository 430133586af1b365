//! Fluent builder for Scheduler construction.
//!
//! Provides a builder pattern interface for choosing the clock and the idle policy of a
//! [`Scheduler`]. The pool capacity is a const parameter given at [`build`] time.
//!
//! [`build`]: SchedulerBuilder::build

use crate::scheduler::Scheduler;
use crate::time::{Clock, SystemClock};

use std::time::Duration;

/// Idle policy of a scheduler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) max_idle: Option<Duration>,
    pub(crate) event_poll_interval: Option<Duration>,
}

/// Builder for constructing Scheduler instances with fluent API.
///
/// # Example
/// ```ignore
/// use cosched::SchedulerBuilder;
/// use cosched::time::MockClock;
/// use std::time::Duration;
///
/// let scheduler = SchedulerBuilder::new()
///     .clock(MockClock::new())
///     .max_idle(Duration::from_millis(10))
///     .build::<8>();
/// ```
pub struct SchedulerBuilder<C = SystemClock> {
    clock: C,
    config: Config,
}

impl Default for SchedulerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulerBuilder {
    /// Creates a builder for a scheduler on the system clock that busy-polls for events
    /// and idles exactly until the next timer.
    pub fn new() -> Self {
        Self {
            clock: SystemClock,
            config: Config::default(),
        }
    }
}

impl<C: Clock> SchedulerBuilder<C> {
    /// Uses `clock` for timer conditions and the idle wait.
    pub fn clock<C2: Clock>(self, clock: C2) -> SchedulerBuilder<C2> {
        SchedulerBuilder {
            clock,
            config: self.config,
        }
    }

    /// Caps every idle wait at `max`.
    ///
    /// Without a cap the scheduler blocks until the next timer expires, and event flags
    /// set in the meantime are noticed only afterwards. A cap bounds that latency.
    pub fn max_idle(mut self, max: Duration) -> Self {
        self.config.max_idle = Some(max);
        self
    }

    /// Idles for `interval` when no timer is pending and no task is runnable.
    ///
    /// By default the scheduler busy-polls event flags in that situation, which gives
    /// the lowest event latency at the cost of a spinning thread.
    pub fn event_poll_interval(mut self, interval: Duration) -> Self {
        self.config.event_poll_interval = Some(interval);
        self
    }

    /// Builds a scheduler with room for `N` tasks.
    ///
    /// # Example
    /// ```ignore
    /// let scheduler = SchedulerBuilder::new().build::<4>();
    /// assert_eq!(scheduler.capacity(), 4);
    /// ```
    pub fn build<const N: usize>(self) -> Scheduler<N, C> {
        Scheduler::from_parts(self.clock, self.config)
    }
}
