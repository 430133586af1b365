#![allow(dead_code)]

use cosched::{Context, EventFlag, Procedure, Resumable, WakeupCondition};

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// In-memory output shared between a procedure and the test.
#[derive(Clone, Default)]
pub struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.borrow())
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// One thing a scripted procedure does when stepped.
#[derive(Debug, Clone)]
pub enum Action {
    Sleep(Duration),
    Yield,
    Wait(EventFlag),
    Finish,
}

/// A step as observed by a scripted procedure.
#[derive(Debug, Clone)]
pub struct StepRecord {
    pub name: &'static str,
    pub index: usize,
    pub at: Instant,
    pub tick: u64,
}

/// Shared log of every step taken, plus the tick counter the test advances.
#[derive(Clone, Default)]
pub struct Journal {
    steps: Rc<RefCell<Vec<StepRecord>>>,
    tick: Rc<Cell<u64>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tick(&self, tick: u64) {
        self.tick.set(tick);
    }

    pub fn steps(&self) -> Vec<StepRecord> {
        self.steps.borrow().clone()
    }

    pub fn steps_of(&self, name: &str) -> Vec<StepRecord> {
        self.steps
            .borrow()
            .iter()
            .filter(|record| record.name == name)
            .cloned()
            .collect()
    }
}

/// Procedure that plays a fixed list of actions, one per step, and checks on every step
/// that the condition it returned last really held.
pub struct Script {
    name: &'static str,
    actions: VecDeque<Action>,
    index: usize,
    waiting_on: Option<WakeupCondition>,
    journal: Journal,
}

impl Script {
    pub fn new(name: &'static str, actions: Vec<Action>, journal: &Journal) -> Self {
        Self {
            name,
            actions: actions.into(),
            index: 0,
            waiting_on: None,
            journal: journal.clone(),
        }
    }
}

impl Resumable for Script {
    fn step(&mut self, cx: &mut Context<'_>) -> WakeupCondition {
        let now = cx.now();

        match &self.waiting_on {
            Some(WakeupCondition::Finished) => {
                panic!("{} stepped after finishing", self.name)
            }
            Some(WakeupCondition::Timer { at }) => {
                assert!(now >= *at, "{} stepped before its deadline", self.name)
            }
            Some(WakeupCondition::Event(flag)) => {
                assert!(flag.is_ready(), "{} stepped while its flag is pending", self.name)
            }
            Some(WakeupCondition::Immediate) | None => {}
        }

        self.journal.steps.borrow_mut().push(StepRecord {
            name: self.name,
            index: self.index,
            at: now,
            tick: self.journal.tick.get(),
        });
        self.index += 1;

        let condition = match self.actions.pop_front() {
            Some(Action::Sleep(duration)) => cx.sleep(duration),
            Some(Action::Yield) => WakeupCondition::immediate(),
            Some(Action::Wait(flag)) => WakeupCondition::event(flag),
            Some(Action::Finish) | None => WakeupCondition::finished(),
        };
        self.waiting_on = Some(condition.clone());
        condition
    }
}

impl Procedure for Script {
    type Args = ();

    fn init(&mut self, (): ()) {
        self.index = 0;
        self.waiting_on = None;
    }
}

/// Wraps a procedure and records the clock at every step and what it returned.
pub struct Probe<P> {
    inner: P,
    log: Rc<RefCell<Vec<(Instant, WakeupCondition)>>>,
}

impl<P> Probe<P> {
    pub fn new(inner: P) -> (Self, Rc<RefCell<Vec<(Instant, WakeupCondition)>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                inner,
                log: log.clone(),
            },
            log,
        )
    }
}

impl<P: Resumable> Resumable for Probe<P> {
    fn step(&mut self, cx: &mut Context<'_>) -> WakeupCondition {
        let now = cx.now();
        let condition = self.inner.step(cx);
        self.log.borrow_mut().push((now, condition.clone()));
        condition
    }
}

impl<P: Procedure> Procedure for Probe<P> {
    type Args = P::Args;

    fn init(&mut self, args: P::Args) {
        self.inner.init(args);
    }
}
