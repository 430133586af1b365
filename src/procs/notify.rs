use crate::condition::WakeupCondition;
use crate::coroutine::{Context, Procedure, Resumable, Resume};
use crate::event::EventFlag;
use crate::procs::emit;

use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Point {
    #[default]
    Start,
    Waiting,
}

/// Waits for an event flag over and over, reporting each time it was signaled.
///
/// The flag is re-armed before every wait, so each signal is reported once.
pub struct WaitForNotify<W> {
    resume: Resume<Point>,
    flag: EventFlag,
    received: u32,
    out: W,
}

impl<W: Write> WaitForNotify<W> {
    pub fn new(out: W) -> Self {
        Self {
            resume: Resume::new(),
            flag: EventFlag::new(),
            received: 0,
            out,
        }
    }

    /// How many signals were received so far.
    pub fn received(&self) -> u32 {
        self.received
    }
}

impl<W: Write> Resumable for WaitForNotify<W> {
    fn step(&mut self, _cx: &mut Context<'_>) -> WakeupCondition {
        if self.resume.at() == Point::Waiting {
            self.received += 1;
            emit(&mut self.out, format_args!("signal received"));
        }

        emit(&mut self.out, format_args!("waiting for notify"));
        self.flag.arm();
        self.resume
            .suspend(Point::Waiting, WakeupCondition::event(self.flag.clone()))
    }
}

impl<W: Write> Procedure for WaitForNotify<W> {
    type Args = EventFlag;

    fn init(&mut self, flag: EventFlag) {
        self.flag = flag;
        self.received = 0;
        self.resume.restart();
    }
}
