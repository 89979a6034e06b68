//! Error handlers decide whether an agent survives a failure.

use crate::error::Failure;

/// Outcome of an [`ErrorHandler`] decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Keep the agent alive and move on to the next message.
    Continue,
    /// Stop the agent. Messages still in the mailbox are dropped.
    Stop,
}

/// Called by the processing loop for every failed update or read.
///
/// There is no automatic retry. A handler that returns [`Resolution::Continue`]
/// leaves the state as it was before the failing message.
///
/// Panics are caught with `catch_unwind`, which still runs the process panic
/// hook first: a panicking update prints the usual panic message (and a backtrace
/// under `RUST_BACKTRACE`) before the handler sees it. Install a quieter hook with
/// [`std::panic::set_hook`] if the handler's own logging is enough.
pub trait ErrorHandler: Send + 'static {
    fn handle(&mut self, failure: &Failure) -> Resolution;
}

/// The default handler: log the failure and stop the agent.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAndStop;

impl ErrorHandler for LogAndStop {
    fn handle(&mut self, failure: &Failure) -> Resolution {
        tracing::error!(%failure, "agent failure, stopping");
        Resolution::Stop
    }
}

/// Log the failure and keep going.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAndContinue;

impl ErrorHandler for LogAndContinue {
    fn handle(&mut self, failure: &Failure) -> Resolution {
        tracing::warn!(%failure, "agent failure, continuing");
        Resolution::Continue
    }
}

impl<F> ErrorHandler for F
where
    F: FnMut(&Failure) -> Resolution + Send + 'static,
{
    #[inline]
    fn handle(&mut self, failure: &Failure) -> Resolution {
        self(failure)
    }
}
