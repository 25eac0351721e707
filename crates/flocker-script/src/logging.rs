//! Logging initialization.
//!
//! Sets up a tracing subscriber from the verbosity counter, writing to an
//! injected [`OutputStream`] rather than the process stderr. The subscriber is
//! the default for the current thread until the returned guard is dropped, so
//! a script can be run several times in one process.

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::FmtSubscriber;

use crate::context::OutputStream;
use crate::verbosity::Verbosity;

/// Install a subscriber at the level selected by `verbosity`.
///
/// Events are recorded while the returned guard is alive; hold it for the
/// whole main routine. The runner drives main routines on a current-thread
/// runtime, so the guard covers every task the routine awaits.
#[must_use = "logging stops when the guard is dropped"]
pub fn initialize_logging(verbosity: usize, writer: OutputStream) -> DefaultGuard {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Verbosity::from_count(verbosity).level())
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::set_default(subscriber)
}
