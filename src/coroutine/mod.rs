//! Resumable procedures: the suspend/resume protocol.
//!
//! A procedure is a plain struct whose [`Resumable::step`] runs forward from its last
//! suspension point and returns a [`WakeupCondition`]. Nothing lives on a call stack
//! between two steps, so every value a procedure needs after a suspension must be a field
//! of the struct.
//!
//! The position to resume from is tracked by a [`Resume`] marker over the procedure's own
//! resume-point enum. `step` matches on [`Resume::at`] at entry, which jumps straight past
//! the suspension call that stored that point.
//!
//! # Example
//!
//! ```ignore
//! use cosched::{Context, Procedure, Resumable, Resume, WakeupCondition};
//! use std::time::Duration;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
//! enum Point {
//!     #[default]
//!     Start,
//!     Slept,
//! }
//!
//! struct Blink {
//!     resume: Resume<Point>,
//!     on: Duration,
//! }
//!
//! impl Resumable for Blink {
//!     fn step(&mut self, cx: &mut Context<'_>) -> WakeupCondition {
//!         match self.resume.at() {
//!             Point::Start => self.resume.suspend(Point::Slept, cx.sleep(self.on)),
//!             Point::Slept => self.resume.finish(),
//!         }
//!     }
//! }
//!
//! impl Procedure for Blink {
//!     type Args = Duration;
//!
//!     fn init(&mut self, on: Duration) {
//!         self.on = on;
//!         self.resume.restart();
//!     }
//! }
//! ```

mod resume;

pub use resume::Resume;

use crate::condition::WakeupCondition;
use crate::time::Clock;

use std::fmt;
use std::time::{Duration, Instant};

/// A unit of sequential logic that can be stepped until it reports
/// [`WakeupCondition::Finished`].
pub trait Resumable {
    /// Runs the procedure forward from its last suspension point.
    ///
    /// Must not block: the only way to wait is to return a condition.
    fn step(&mut self, cx: &mut Context<'_>) -> WakeupCondition;
}

/// A [`Resumable`] that is started with arguments.
///
/// `init` is called by its owner before the first step. It stores the start arguments
/// and rewinds the resumption marker, so an instance can be started again once it has
/// finished.
pub trait Procedure: Resumable {
    type Args;

    fn init(&mut self, args: Self::Args);
}

impl<R: Resumable + ?Sized> Resumable for Box<R> {
    fn step(&mut self, cx: &mut Context<'_>) -> WakeupCondition {
        (**self).step(cx)
    }
}

/// What a procedure may look at while it is being stepped.
///
/// Gives access to the scheduler's clock so that timer conditions are computed against
/// the same monotonic time the scheduler compares them with.
pub struct Context<'a> {
    clock: &'a dyn Clock,
}

impl<'a> Context<'a> {
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self { clock }
    }

    /// The current instant of the scheduler's clock.
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// A timer condition that expires `duration` from now.
    pub fn sleep(&self, duration: Duration) -> WakeupCondition {
        WakeupCondition::timer(self.clock.now(), duration)
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context").field("now", &self.now()).finish()
    }
}
