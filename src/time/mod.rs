//! Time sources for the scheduler.
//!
//! The scheduler never reads wall-clock time. Everything goes through a [`Clock`], which
//! provides a monotonic `now()` and the one blocking call of the whole design: the idle
//! wait between poll passes.
//!
//! - [`SystemClock`] uses [`std::time::Instant`] and sleeps the thread.
//! - [`MockClock`] keeps virtual time that only moves when told to; idling advances it
//!   instead of blocking, which makes scheduling tests deterministic.
//!
//! # Example
//!
//! ```ignore
//! use cosched::time::{Clock, MockClock};
//! use std::time::Duration;
//!
//! let clock = MockClock::new();
//! let start = clock.now();
//! clock.idle(Duration::from_millis(5));
//! assert_eq!(clock.now() - start, Duration::from_millis(5));
//! ```

mod clock;
mod mock;

pub use clock::{Clock, SystemClock};
pub use mock::MockClock;
