use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic time source with a coarse blocking wait.
pub trait Clock {
    /// Returns the current instant. Must never go backwards.
    fn now(&self) -> Instant;

    /// Blocks the calling thread for `duration`.
    ///
    /// Only called by the scheduler's idle wait, and never with a zero duration.
    fn idle(&self, duration: Duration);
}

/// The process' monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn idle(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn idle(&self, duration: Duration) {
        (**self).idle(duration)
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn idle(&self, duration: Duration) {
        (**self).idle(duration)
    }
}
