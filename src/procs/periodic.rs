use crate::condition::WakeupCondition;
use crate::coroutine::{Context, Procedure, Resumable, Resume};
use crate::procs::{Sleep, emit};

use std::io::Write;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Point {
    #[default]
    Start,
    Sleeping,
    Yielded,
}

/// Prints `"<label>: <n>"` once per period, forever.
///
/// Each round runs an embedded [`Sleep`] to completion, prints the counter, yields once
/// and prints `"<label> post yield"` when it gets the next pass.
pub struct PeriodicPrint<W> {
    resume: Resume<Point>,
    sleep: Sleep,
    period: Duration,
    label: String,
    count: u32,
    out: W,
}

impl<W: Write> PeriodicPrint<W> {
    pub fn new(label: impl Into<String>, out: W) -> Self {
        Self {
            resume: Resume::new(),
            sleep: Sleep::new(),
            period: Duration::ZERO,
            label: label.into(),
            count: 0,
            out,
        }
    }

    /// How many times the counter was printed.
    pub fn count(&self) -> u32 {
        self.count
    }
}

impl<W: Write> Resumable for PeriodicPrint<W> {
    fn step(&mut self, cx: &mut Context<'_>) -> WakeupCondition {
        loop {
            match self.resume.at() {
                Point::Start => self.resume.goto(Point::Sleeping),
                Point::Sleeping => {
                    let pending = self
                        .resume
                        .call(Point::Sleeping, &mut self.sleep, self.period, cx);
                    if let Some(condition) = pending {
                        return condition;
                    }

                    emit(&mut self.out, format_args!("{}: {}", self.label, self.count));
                    self.count += 1;
                    return self.resume.yield_now(Point::Yielded);
                }
                Point::Yielded => {
                    emit(&mut self.out, format_args!("{} post yield", self.label));
                    self.resume.goto(Point::Sleeping);
                }
            }
        }
    }
}

impl<W: Write> Procedure for PeriodicPrint<W> {
    type Args = Duration;

    fn init(&mut self, period: Duration) {
        self.period = period;
        self.count = 0;
        self.resume.restart();
    }
}
