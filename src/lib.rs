//! Cooperative scheduler for resumable procedures on a single thread.
//!
//! This crate runs many independent, stateful procedures on one thread without an OS
//! scheduler, waking each one only when the condition it declared holds: a deadline on a
//! monotonic clock, or an event flag set from outside. It is meant for control loops and
//! embedded-style programs where every suspension point is chosen by the procedure's
//! author and nothing is ever preempted.
//!
//! # Architecture
//!
//! - **WakeupCondition**: Why/when a task becomes runnable again (finished, immediate,
//!   timer, event)
//! - **EventFlag**: Shared byte set by a signal handler or another thread, read by the
//!   scheduler
//! - **Resumable / Procedure**: A procedure stepped forward from its last suspension point
//! - **Resume**: Resumption marker, with the suspend, yield and call protocol
//! - **Scheduler**: Fixed pool of tasks, timer heap, ready/event set and the poll loop
//! - **SchedulerBuilder**: Fluent builder for clock and idle policy
//! - **Clock**: Monotonic time source and the idle wait, with a mock for tests
//!
//! # Example
//!
//! ```ignore
//! use cosched::Scheduler;
//! use cosched::procs::PeriodicPrint;
//! use std::time::Duration;
//!
//! let mut scheduler = Scheduler::<4>::new();
//! scheduler
//!     .add_task(PeriodicPrint::new("tick", std::io::stdout()), Duration::from_secs(1))
//!     .expect("pool has room");
//! scheduler.run();
//! ```

mod builder;
mod condition;
mod coroutine;
mod error;
mod event;
mod scheduler;
mod task;
mod utils;

pub mod procs;
pub mod time;

pub use builder::SchedulerBuilder;
pub use condition::WakeupCondition;
pub use coroutine::{Context, Procedure, Resumable, Resume};
pub use error::AddTaskError;
pub use event::EventFlag;
pub use scheduler::{Scheduler, Tick};
pub use task::TaskId;
