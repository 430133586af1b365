use crate::condition::WakeupCondition;
use crate::coroutine::{Context, Procedure, Resumable, Resume};

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Point {
    #[default]
    Start,
    FirstHalf,
    SecondHalf,
}

/// Sleeps for a total duration, suspending twice on timers half of it apart.
///
/// The second half is whatever the first one left over, so the two waits never add up
/// to less than the requested duration.
///
/// # Example
///
/// ```ignore
/// let mut scheduler = Scheduler::<1>::new();
/// scheduler.add_task(Sleep::new(), Duration::from_millis(100))?;
/// scheduler.run_until_idle();
/// ```
#[derive(Debug, Default)]
pub struct Sleep {
    resume: Resume<Point>,
    duration: Duration,
}

impl Sleep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_finished(&self) -> bool {
        self.resume.is_finished()
    }
}

impl Resumable for Sleep {
    fn step(&mut self, cx: &mut Context<'_>) -> WakeupCondition {
        match self.resume.at() {
            Point::Start => {
                log::debug!("sleep 1");
                let half = self.duration / 2;
                self.resume.suspend(Point::FirstHalf, cx.sleep(half))
            }
            Point::FirstHalf => {
                log::debug!("sleep 2");
                let rest = self.duration - self.duration / 2;
                self.resume.suspend(Point::SecondHalf, cx.sleep(rest))
            }
            Point::SecondHalf => {
                log::debug!("ret");
                self.resume.finish()
            }
        }
    }
}

impl Procedure for Sleep {
    type Args = Duration;

    fn init(&mut self, duration: Duration) {
        self.duration = duration;
        self.resume.restart();
    }
}
