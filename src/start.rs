//! Launching [`Actor`]s onto the tokio runtime.
//!
//! [`ActorExt`] is implemented for every [`Actor`]. It creates the mailbox,
//! spawns the actor's `run` future and returns the sending side, so callers
//! never touch `tokio::spawn` or channel plumbing directly.

use crate::{Actor, UnboundedOutbox};
use futures::Stream;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Startup methods available on every [`Actor`].
pub trait ActorExt: Actor {
    /// Spawns the actor on the current runtime, reading from an existing stream.
    ///
    /// The returned `JoinHandle` resolves when `run` returns.
    ///
    /// # Panics
    /// Panics when called outside of a tokio runtime.
    fn start_with<I>(self, inbox: I) -> JoinHandle<()>
    where
        I: Stream<Item = Self::Message> + Send + 'static,
    {
        tokio::spawn(self.run(inbox))
    }

    /// Spawns the actor with an **unbounded** mailbox.
    ///
    /// Sending never blocks and never fails while the actor is running. A
    /// producer that outpaces the actor grows the mailbox without limit.
    ///
    /// # Examples
    /// ```
    /// use acty_agent::{Actor, ActorExt, Inbox};
    /// use futures::StreamExt;
    /// use std::pin::pin;
    ///
    /// struct Greeter;
    ///
    /// impl Actor for Greeter {
    ///     type Message = String;
    ///
    ///     async fn run(self, inbox: impl Inbox<Item = Self::Message>) {
    ///         let mut inbox = pin!(inbox);
    ///         while let Some(name) = inbox.next().await {
    ///             println!("Hello, {}!", name);
    ///         }
    ///     }
    /// }
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let outbox = Greeter.start();
    ///     outbox.send("World".to_string()).unwrap();
    ///
    ///     // Dropping the last outbox ends the inbox; close waits for that.
    ///     outbox.close().await;
    /// }
    /// ```
    fn start(self) -> UnboundedOutbox<Self::Message> {
        let (sender, receiver) = tokio::sync::mpsc::unbounded_channel();
        let receiver_stream = UnboundedReceiverStream::new(receiver);
        UnboundedOutbox::new(sender, self.start_with(receiver_stream))
    }
}

impl<A: Actor> ActorExt for A {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Inbox;
    use futures::StreamExt;
    use std::pin::pin;
    use tokio::sync::oneshot;

    /// Counts messages and reports the total when the inbox ends
    struct CountActor {
        result_tx: oneshot::Sender<u64>,
    }

    impl Actor for CountActor {
        type Message = String;

        async fn run(self, inbox: impl Inbox<Item = Self::Message>) {
            let mut inbox = pin!(inbox);
            let mut count = 0;

            while (inbox.next().await).is_some() {
                count += 1;
            }

            self.result_tx.send(count).unwrap_or(());
        }
    }

    #[tokio::test]
    async fn test_unbounded_start() {
        let (tx, rx) = oneshot::channel();
        let outbox = CountActor { result_tx: tx }.start();

        outbox.send("msg1".to_string()).expect("Failed to send 1");
        outbox.send("msg2".to_string()).expect("Failed to send 2");
        outbox.close().await;

        assert_eq!(rx.await.expect("Actor did not return result"), 2);
    }

    #[tokio::test]
    async fn test_start_with_external_stream() {
        let (tx, rx) = oneshot::channel();
        let inbox = futures::stream::iter(["a", "b", "c"].map(String::from));

        CountActor { result_tx: tx }
            .start_with(inbox)
            .await
            .expect("Actor task failed");

        assert_eq!(rx.await.unwrap(), 3);
    }
}
