//! Ready-made procedures.
//!
//! - [`Sleep`]: waits for a duration in two halves, then finishes
//! - [`PeriodicPrint`]: prints a counter every period, forever, through an embedded
//!   [`Sleep`]
//! - [`WaitForNotify`]: reports every time an [`EventFlag`](crate::EventFlag) is signaled
//!
//! They double as examples of the suspend/resume protocol: each keeps every value it
//! needs across a suspension in a field, and matches on its resume point at entry.

mod notify;
mod periodic;
mod sleep;

pub use notify::WaitForNotify;
pub use periodic::PeriodicPrint;
pub use sleep::Sleep;

use std::io::Write;

/// Writes one line, logging instead of failing: a step has no error channel.
fn emit<W: Write>(out: &mut W, line: std::fmt::Arguments<'_>) {
    if let Err(err) = writeln!(out, "{line}").and_then(|()| out.flush()) {
        log::warn!("failed to write procedure output: {err}");
    }
}
