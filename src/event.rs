//! Externally signalled event flags.
//!
//! An [`EventFlag`] is a single byte shared between the scheduler and whatever code
//! signals it: another thread, an interrupt, or a POSIX signal handler. The scheduler
//! only ever reads it; a task waiting on it becomes runnable once the byte reads zero.
//!
//! # Example
//!
//! ```ignore
//! use cosched::{EventFlag, WakeupCondition};
//!
//! let flag = EventFlag::new();
//! assert!(!flag.is_ready());
//!
//! let waiting = WakeupCondition::event(flag.clone());
//! flag.signal();
//! assert!(flag.is_ready());
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

const PENDING: u8 = 1;
const READY: u8 = 0;

/// Cloneable handle to a shared event byte.
///
/// Nonzero means "not yet signaled", zero means "ready". Every clone refers to the same
/// byte, so the flag lives as long as the last condition or signaller holding it.
#[derive(Clone)]
pub struct EventFlag {
    state: Arc<AtomicU8>,
}

impl EventFlag {
    /// Creates a new flag in the pending state.
    pub fn new() -> Self {
        Self {
            state: Arc::new(AtomicU8::new(PENDING)),
        }
    }

    /// Marks the event as happened.
    ///
    /// A single atomic store, so this may be called from a signal handler or any other
    /// thread while the scheduler is polling.
    #[inline]
    pub fn signal(&self) {
        self.state.store(READY, Ordering::Release);
    }

    /// Puts the flag back into the pending state before waiting on it again.
    #[inline]
    pub fn arm(&self) {
        self.state.store(PENDING, Ordering::Release);
    }

    /// Returns `true` once the flag reads zero.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.state.load(Ordering::Acquire) == READY
    }

    /// Returns the raw byte currently stored in the flag.
    pub fn raw(&self) -> u8 {
        self.state.load(Ordering::Acquire)
    }

    /// Returns `true` if both handles refer to the same byte.
    pub fn same_flag(&self, other: &EventFlag) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl Default for EventFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventFlag")
            .field("addr", &Arc::as_ptr(&self.state))
            .field("value", &self.raw())
            .finish()
    }
}
