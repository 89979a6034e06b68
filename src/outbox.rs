use std::ops::Deref;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A sender that can be released asynchronously.
#[trait_variant::make(Send)]
pub trait AsyncClose {
    async fn close(self);
}

impl<T: Send> AsyncClose for tokio::sync::mpsc::UnboundedSender<T> {
    /// Dropping the last sender ends the receiving inbox once it is drained.
    #[inline]
    async fn close(self) {
        drop(self);
    }
}

#[derive(Debug, Clone)]
struct ActorHandle {
    join_handle: Arc<JoinHandle<()>>,
}

impl ActorHandle {
    fn new(join_handle: JoinHandle<()>) -> Self {
        Self {
            join_handle: Arc::new(join_handle),
        }
    }

    /// Waits for the actor task if this is the last handle; other holders return at once.
    async fn wait_for_completion(self) {
        if let Some(join_handle) = Arc::into_inner(self.join_handle) {
            if let Err(err) = join_handle.await {
                tracing::warn!(error = %err, "actor task did not complete");
            }
        }
    }
}

/// The sending side of an actor's mailbox, together with the actor's task.
#[derive(Debug, Clone)]
pub struct Outbox<S> {
    sender: S,
    handle: ActorHandle,
}

impl<S> Outbox<S> {
    pub fn new(sender: S, join_handle: JoinHandle<()>) -> Self {
        Self {
            sender,
            handle: ActorHandle::new(join_handle),
        }
    }
}

impl<S: AsyncClose> Outbox<S> {
    /// Releases this sender. The last clone to close also waits for the actor to finish.
    pub async fn close(self) {
        self.sender.close().await;
        self.handle.wait_for_completion().await;
    }
}

impl<S> Deref for Outbox<S> {
    type Target = S;

    fn deref(&self) -> &Self::Target {
        &self.sender
    }
}

pub type UnboundedOutbox<T> = Outbox<tokio::sync::mpsc::UnboundedSender<T>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Actor, Inbox};
    use futures::StreamExt;
    use tokio::sync::{mpsc, oneshot};
    use tokio_stream::wrappers::UnboundedReceiverStream;

    // 记录收到的消息总和，inbox 结束后通过 exit_tx 回传
    // 这允许我们精确掌握 Actor 的生命周期，用于测试 Outbox 引用计数。
    struct SummingActor {
        // Actor 启动信号
        start_tx: oneshot::Sender<()>,

        // Actor 退出信号，携带消息总和
        exit_tx: oneshot::Sender<u32>,
    }

    impl Actor for SummingActor {
        type Message = u32;

        async fn run(self, inbox: impl Inbox<Item = Self::Message>) {
            self.start_tx.send(()).unwrap_or(());

            // 耗尽 inbox
            let sum = inbox.fold(0, |acc, n| async move { acc + n }).await;

            self.exit_tx.send(sum).unwrap_or(());
        }
    }

    fn launch_summing_actor() -> (
        UnboundedOutbox<u32>,
        oneshot::Receiver<()>,
        oneshot::Receiver<u32>,
    ) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (start_tx, start_rx) = oneshot::channel();
        let (exit_tx, exit_rx) = oneshot::channel();

        let actor = SummingActor { start_tx, exit_tx };
        let join_handle = tokio::spawn(actor.run(UnboundedReceiverStream::new(receiver)));

        (Outbox::new(sender, join_handle), start_rx, exit_rx)
    }

    #[tokio::test]
    async fn test_outbox_deref_to_sender() {
        let (outbox, start_rx, exit_rx) = launch_summing_actor();
        start_rx.await.unwrap();

        // 通过 Deref 直接调用 UnboundedSender::send
        outbox.send(40).unwrap();
        outbox.send(2).unwrap();
        outbox.close().await;

        assert_eq!(exit_rx.await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_last_close_waits_for_completion() {
        let (outbox, start_rx, mut exit_rx) = launch_summing_actor();
        start_rx.await.unwrap();

        let clone = outbox.clone();

        // 第一次关闭：仍有其他引用，不会等待，actor 继续运行
        outbox.close().await;
        assert!(exit_rx.try_recv().is_err());

        // 第二次关闭：最后一个引用，等待 actor 结束后返回
        clone.close().await;
        assert_eq!(exit_rx.try_recv().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_close_keeps_already_sent_messages() {
        let (sender, mut receiver) = mpsc::unbounded_channel::<i32>();
        let outbox = Outbox::new(sender, tokio::spawn(async {}));

        outbox.send(1).unwrap();
        outbox.close().await;

        // 已发送的消息仍可被接收，随后通道关闭
        assert_eq!(receiver.recv().await, Some(1));
        assert_eq!(receiver.recv().await, None);
    }
}
