//! The agent: a single value owned by its own task.
//!
//! [`Agent`] is the not-yet-started configuration. [`Agent::start`] moves the
//! state onto a tokio task, which becomes the only place the state is ever read
//! or written, and hands back an [`AgentRef`] for callers.

use crate::copy::{CopyStrategy, IdentityCopy};
use crate::error::{BoxError, Cause, Failure};
use crate::handler::{ErrorHandler, LogAndStop, Resolution};
use crate::{Actor, ActorExt, AgentRef, Inbox, Message};
use futures::StreamExt;
use std::panic::{self, AssertUnwindSafe};
use std::pin::pin;
use tokio::runtime::Handle;
use tracing::Instrument;

/// A state value together with the collaborators that govern it.
///
/// # Examples
/// ```
/// use acty_agent::Agent;
///
/// #[tokio::main]
/// async fn main() {
///     let counter = Agent::new(0_u64).name("counter").start();
///
///     counter.send_fn(|n| n + 10).unwrap();
///     counter.send_fn(|n| n + 20).unwrap();
///
///     assert_eq!(counter.read().await, Ok(30));
/// }
/// ```
pub struct Agent<T> {
    state: T,
    name: Option<String>,
    copy_strategy: Box<dyn CopyStrategy<T>>,
    error_handler: Box<dyn ErrorHandler>,
}

impl<T: Clone + Send + 'static> Agent<T> {
    /// Creates an agent whose readers receive clones of the state.
    pub fn new(initial: T) -> Self {
        Self::with_copy_strategy(initial, IdentityCopy)
    }
}

impl<T: Send + 'static> Agent<T> {
    /// Creates an agent with a custom copy strategy. `T` does not need to be `Clone`.
    pub fn with_copy_strategy(initial: T, strategy: impl CopyStrategy<T>) -> Self {
        Self {
            state: initial,
            name: None,
            copy_strategy: Box::new(strategy),
            error_handler: Box::new(LogAndStop),
        }
    }

    /// Names the agent in its tracing span.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the copy strategy that produces reader snapshots.
    pub fn copy_strategy(mut self, strategy: impl CopyStrategy<T>) -> Self {
        self.copy_strategy = Box::new(strategy);
        self
    }

    /// Replaces the default [`LogAndStop`] handler.
    pub fn error_handler(mut self, handler: impl ErrorHandler) -> Self {
        self.error_handler = Box::new(handler);
        self
    }

    /// Starts the processing loop on the current tokio runtime.
    ///
    /// # Panics
    /// Panics when called outside of a tokio runtime; use [`Agent::start_on`] there.
    pub fn start(self) -> AgentRef<T> {
        AgentRef::new(ActorExt::start(self))
    }

    /// Starts the processing loop on the given runtime, from any thread.
    pub fn start_on(self, runtime: &Handle) -> AgentRef<T> {
        let _guard = runtime.enter();
        self.start()
    }

    fn process(&mut self, message: Message<T>) -> Result<(), Failure> {
        match message {
            Message::SetValue(value) => {
                self.state = value;
                Ok(())
            }
            Message::UpdateFn(f) => {
                let state = &self.state;
                let next = guarded(|| f(state)).map_err(Failure::Update)?;
                self.state = next;
                Ok(())
            }
            Message::ConsumeFn(f) => {
                let (state, copy_strategy) = (&self.state, &*self.copy_strategy);
                guarded(|| f(copy_strategy.copy(state))).map_err(Failure::Consume)
            }
        }
    }
}

/// Runs a submitted function, turning both panics and returned errors into a [`Cause`].
fn guarded<R>(f: impl FnOnce() -> Result<R, BoxError>) -> Result<R, Cause> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result.map_err(Cause::Error),
        Err(payload) => Err(Cause::from_panic(payload)),
    }
}

impl<T: Send + 'static> Actor for Agent<T> {
    type Message = Message<T>;

    async fn run(mut self, inbox: impl Inbox<Item = Self::Message>) {
        let span = tracing::debug_span!("agent", agent = self.name.as_deref().unwrap_or("-"));

        async move {
            let mut inbox = pin!(inbox);
            tracing::debug!("agent running");

            while let Some(message) = inbox.next().await {
                let Err(failure) = self.process(message) else {
                    continue;
                };
                if self.error_handler.handle(&failure) == Resolution::Stop {
                    tracing::debug!("agent stopped by its error handler");
                    return;
                }
            }

            tracing::debug!("agent mailbox closed");
        }
        .instrument(span)
        .await
    }
}

impl<T> std::fmt::Debug for Agent<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent").field("name", &self.name).finish_non_exhaustive()
    }
}
