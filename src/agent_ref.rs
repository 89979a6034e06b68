use crate::error::{AgentError, AgentResult, BoxError};
use crate::{Message, UnboundedOutbox};
use std::future::Future;
use std::time::Duration;
use tokio::sync::oneshot;

/// Handle to a running [`Agent`](crate::Agent).
///
/// Cloning is cheap and every clone talks to the same mailbox. All writes and
/// asynchronous reads are fire-and-forget: they return as soon as the message is
/// enqueued, and only fail when the agent has already stopped.
pub struct AgentRef<T> {
    outbox: UnboundedOutbox<Message<T>>,
}

impl<T: Send + 'static> AgentRef<T> {
    pub(crate) fn new(outbox: UnboundedOutbox<Message<T>>) -> Self {
        Self { outbox }
    }

    fn enqueue(&self, message: Message<T>) -> AgentResult<()> {
        self.outbox.send(message).map_err(|_| AgentError::Stopped)
    }

    /// Replaces the state with `value`.
    pub fn send(&self, value: T) -> AgentResult<()> {
        self.enqueue(Message::SetValue(value))
    }

    /// Replaces the state with `f(&state)`. `f` runs later, on the agent's task.
    pub fn send_fn<F>(&self, f: F) -> AgentResult<()>
    where
        F: FnOnce(&T) -> T + Send + 'static,
    {
        self.enqueue(Message::update(f))
    }

    /// Like [`send_fn`](Self::send_fn), for updates that can fail. An `Err` goes to the
    /// error handler and the state is left as it was.
    pub fn try_send_fn<F, E>(&self, f: F) -> AgentResult<()>
    where
        F: FnOnce(&T) -> Result<T, E> + Send + 'static,
        E: Into<BoxError>,
    {
        self.enqueue(Message::try_update(f))
    }

    /// Calls `callback` with a snapshot once every message enqueued before it has been applied.
    pub fn read_async<F>(&self, callback: F) -> AgentResult<()>
    where
        F: FnOnce(T) + Send + 'static,
    {
        self.enqueue(Message::consume(callback))
    }

    pub fn try_read_async<F, E>(&self, callback: F) -> AgentResult<()>
    where
        F: FnOnce(T) -> Result<(), E> + Send + 'static,
        E: Into<BoxError>,
    {
        self.enqueue(Message::try_consume(callback))
    }

    /// Enqueues a read whose snapshot lands in a oneshot slot.
    ///
    /// If the agent stops before the read runs, or the copy strategy fails, the
    /// sender is dropped and the receiver resolves with an error instead of hanging.
    /// If the receiver is gone by the time the read runs, the snapshot is discarded.
    fn gate(&self) -> AgentResult<oneshot::Receiver<T>> {
        let (tx, rx) = oneshot::channel();
        self.read_async(move |snapshot| {
            let _ = tx.send(snapshot);
        })?;
        Ok(rx)
    }

    /// Reads the state without blocking the calling thread.
    ///
    /// The read is enqueued when `read` is called, not when the future is first
    /// polled, so it is ordered after every write this caller issued before it.
    pub fn read(&self) -> impl Future<Output = AgentResult<T>> + Send + 'static {
        let gate = self.gate();
        async move { gate?.await.map_err(|_| AgentError::Abandoned) }
    }

    /// [`read`](Self::read) with a deadline.
    pub fn read_timeout(
        &self,
        timeout: Duration,
    ) -> impl Future<Output = AgentResult<T>> + Send + 'static {
        let gate = self.gate();
        async move { wait_with_deadline(gate?, timeout).await }
    }

    /// Blocks the calling thread until the snapshot is available.
    ///
    /// Only the caller blocks; the agent's task keeps processing its mailbox.
    ///
    /// # Panics
    /// Panics when called from within an asynchronous execution context. Use
    /// [`read`](Self::read) there, or move the call into `spawn_blocking`.
    pub fn read_sync(&self) -> AgentResult<T> {
        self.gate()?
            .blocking_recv()
            .map_err(|_| AgentError::Abandoned)
    }

    /// [`read_sync`](Self::read_sync) with a deadline. A lapsed read stays in the
    /// mailbox and its snapshot is dropped when it eventually runs.
    ///
    /// The deadline is kept by a timer on the calling thread, so it lapses even
    /// when every worker of the agent's runtime is busy.
    ///
    /// # Panics
    /// Panics when called from within an asynchronous execution context.
    pub fn read_sync_timeout(&self, timeout: Duration) -> AgentResult<T> {
        let gate = self.gate()?;
        let clock = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|err| AgentError::Timer(err.to_string()))?;
        clock.block_on(wait_with_deadline(gate, timeout))
    }

    /// True once the agent's loop has exited.
    pub fn is_stopped(&self) -> bool {
        self.outbox.is_closed()
    }

    /// Resolves once the agent's loop has exited.
    pub async fn stopped(&self) {
        self.outbox.closed().await
    }

    /// Releases this handle. When it is the last one, the agent finishes the messages
    /// already in its mailbox, and `close` returns after the loop has exited.
    pub async fn close(self) {
        self.outbox.close().await
    }
}

async fn wait_with_deadline<T>(
    gate: oneshot::Receiver<T>,
    timeout: Duration,
) -> AgentResult<T> {
    match tokio::time::timeout(timeout, gate).await {
        Ok(snapshot) => snapshot.map_err(|_| AgentError::Abandoned),
        Err(_) => Err(AgentError::Timeout(timeout)),
    }
}

impl<T> Clone for AgentRef<T> {
    fn clone(&self) -> Self {
        Self {
            outbox: self.outbox.clone(),
        }
    }
}

impl<T> std::fmt::Debug for AgentRef<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRef")
            .field("stopped", &self.outbox.is_closed())
            .finish_non_exhaustive()
    }
}
