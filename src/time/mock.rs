use crate::time::Clock;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A virtual clock for tests.
///
/// Time is an offset from an anchor taken at construction and only moves through
/// [`MockClock::advance`] or the scheduler's idle wait. Clones share the same time, so a
/// test can keep one handle while the scheduler owns another.
#[derive(Clone)]
pub struct MockClock {
    inner: Rc<Inner>,
}

struct Inner {
    anchor: Instant,
    offset: Cell<Duration>,
    idles: RefCell<Vec<Duration>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                anchor: Instant::now(),
                offset: Cell::new(Duration::ZERO),
                idles: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Moves virtual time forward without recording an idle wait.
    pub fn advance(&self, duration: Duration) {
        self.inner.offset.set(self.inner.offset.get() + duration);
    }

    /// Virtual time elapsed since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.inner.offset.get()
    }

    /// The instant the clock started at.
    pub fn start(&self) -> Instant {
        self.inner.anchor
    }

    /// Every idle wait requested so far, in order.
    pub fn idles(&self) -> Vec<Duration> {
        self.inner.idles.borrow().clone()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.inner.anchor + self.inner.offset.get()
    }

    fn idle(&self, duration: Duration) {
        log::trace!("mock clock idling for {duration:?}");
        self.inner.idles.borrow_mut().push(duration);
        self.advance(duration);
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MockClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockClock")
            .field("elapsed", &self.elapsed())
            .field("idles", &self.inner.idles.borrow().len())
            .finish()
    }
}
