use crate::condition::WakeupCondition;
use crate::coroutine::{Context, Procedure};

use std::fmt;

/// Resumption marker of a single procedure.
///
/// `P` is the procedure's resume-point enum. Its `Default` variant means "not yet
/// started". Each suspension call names the point to continue from, so two call sites
/// can never share a marker by accident.
pub struct Resume<P> {
    state: State<P>,
    // `true` while a child started by `call` at the current point has not finished.
    calling: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State<P> {
    At(P),
    Finished,
}

impl<P> Resume<P>
where
    P: Copy + Eq + Default + fmt::Debug,
{
    pub fn new() -> Self {
        Self {
            state: State::At(P::default()),
            calling: false,
        }
    }

    /// The point to resume from.
    ///
    /// # Panics
    ///
    /// Panics if the procedure already finished. A finished procedure has no position
    /// left to resume, and stepping it again is a protocol violation.
    pub fn at(&self) -> P {
        match self.state {
            State::At(point) => point,
            State::Finished => panic!("procedure resumed after finishing"),
        }
    }

    /// Returns `true` once the marker left the start point.
    pub fn is_started(&self) -> bool {
        self.state != State::At(P::default())
    }

    pub fn is_finished(&self) -> bool {
        self.state == State::Finished
    }

    /// Rewinds the marker to the start point.
    pub fn restart(&mut self) {
        self.state = State::At(P::default());
        self.calling = false;
    }

    /// Moves to `next` without suspending.
    ///
    /// Used for loops and for falling through into a point that is also a resume target;
    /// the caller keeps executing in the same step.
    pub fn goto(&mut self, next: P) {
        self.state = State::At(next);
        self.calling = false;
    }

    /// Suspends the procedure until `condition` holds; the next step resumes at `next`.
    pub fn suspend(&mut self, next: P, condition: WakeupCondition) -> WakeupCondition {
        if condition.is_finished() {
            return self.finish();
        }

        self.state = State::At(next);
        self.calling = false;
        condition
    }

    /// Lets every sibling run once before resuming at `next`.
    pub fn yield_now(&mut self, next: P) -> WakeupCondition {
        self.suspend(next, WakeupCondition::immediate())
    }

    /// Ends the procedure for good.
    pub fn finish(&mut self) -> WakeupCondition {
        self.state = State::Finished;
        self.calling = false;
        WakeupCondition::finished()
    }

    /// Drives `child` to completion as one suspension point of the parent.
    ///
    /// On first reaching `site` the child is initialised with `args` and the marker is set
    /// to `site`; later calls at the same site ignore `args`. The child is then stepped:
    /// while it has not finished, its condition is returned as `Some` and the parent must
    /// return it unchanged. Once it finishes this returns `None` and the parent continues
    /// past the call. The child is left as it is.
    ///
    /// # Example
    ///
    /// ```ignore
    /// Point::Sleeping => {
    ///     if let Some(condition) =
    ///         self.resume.call(Point::Sleeping, &mut self.sleep, self.period, cx)
    ///     {
    ///         return condition;
    ///     }
    ///     // the sleep is over
    /// }
    /// ```
    pub fn call<C: Procedure>(
        &mut self,
        site: P,
        child: &mut C,
        args: C::Args,
        cx: &mut Context<'_>,
    ) -> Option<WakeupCondition> {
        if !(self.calling && self.state == State::At(site)) {
            child.init(args);
            self.state = State::At(site);
            self.calling = true;
        }

        match child.step(cx) {
            WakeupCondition::Finished => {
                self.calling = false;
                None
            }
            condition => Some(condition),
        }
    }
}

impl<P> Default for Resume<P>
where
    P: Copy + Eq + Default + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P: fmt::Debug> fmt::Debug for Resume<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resume")
            .field("state", &self.state)
            .field("calling", &self.calling)
            .finish()
    }
}
