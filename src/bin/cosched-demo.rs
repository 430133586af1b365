//! Demo: a periodic printer and a signal waiter sharing one thread.
//!
//! Prints a counter every period and reports every `SIGUSR1` it receives:
//!
//! ```text
//! $ RUST_LOG=debug cosched-demo --period-ms 500 &
//! $ kill -USR1 $!
//! ```

use clap::Parser;
use cosched::procs::{PeriodicPrint, WaitForNotify};
use cosched::{EventFlag, SchedulerBuilder};

use std::io;
use std::process::ExitCode;
use std::sync::OnceLock;
use std::time::Duration;

/// Flag the signal handler sets; the handler cannot capture anything.
static NOTIFY: OnceLock<EventFlag> = OnceLock::new();

#[derive(Debug, Parser)]
#[command(about = "Runs a periodic printer and a SIGUSR1 waiter on one thread")]
struct Args {
    /// Period of the printer in milliseconds
    #[arg(long, default_value_t = 1000)]
    period_ms: u64,

    /// Label printed in front of the counter
    #[arg(long, default_value = "c1")]
    label: String,

    /// Upper bound for a single idle wait in milliseconds
    #[arg(long)]
    max_idle_ms: Option<u64>,
}

extern "C" fn on_sigusr1(_signal: libc::c_int) {
    if let Some(flag) = NOTIFY.get() {
        flag.signal();
    }
}

fn install_sigusr1_handler() -> io::Result<()> {
    // SAFETY: a zeroed sigaction is a valid "no flags, empty mask" value, and the handler
    // only performs an atomic store.
    let result = unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = on_sigusr1 as extern "C" fn(libc::c_int) as libc::sighandler_t;
        libc::sigemptyset(&mut action.sa_mask);
        libc::sigaction(libc::SIGUSR1, &action, std::ptr::null_mut())
    };

    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let flag = NOTIFY.get_or_init(EventFlag::new).clone();
    if let Err(err) = install_sigusr1_handler() {
        log::error!("failed to install SIGUSR1 handler: {err}");
        return ExitCode::FAILURE;
    }

    let mut builder = SchedulerBuilder::new();
    if let Some(ms) = args.max_idle_ms {
        builder = builder.max_idle(Duration::from_millis(ms));
    }
    let mut scheduler = builder.build::<2>();

    let period = Duration::from_millis(args.period_ms);
    if let Err(err) = scheduler.add_task(PeriodicPrint::new(args.label, io::stdout()), period) {
        log::error!("{err}");
        return ExitCode::FAILURE;
    }
    if let Err(err) = scheduler.add_task(WaitForNotify::new(io::stdout()), flag) {
        log::error!("{err}");
        return ExitCode::FAILURE;
    }

    log::info!("send SIGUSR1 to pid {} to notify", std::process::id());
    scheduler.run()
}
