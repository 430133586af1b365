//! Scheduler subsystem modules.

mod core;
mod ready;
mod timers;

pub use self::core::{Scheduler, Tick};
