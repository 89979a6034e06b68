//! # Acty Agent
//!
//! 基于 tokio 的轻量 actor 内核，以及构建在其上的 [Agent]：一个由独立任务独占的状态值，
//! 所有读写都以消息形式进入它的 mailbox，按到达顺序逐条处理，调用方之间无需任何锁。
//!
//! ## 核心概念
//!
//! - **Actor**: 只需实现 [Actor] trait 即可，[ActorExt] 负责创建 mailbox 并启动任务。
//! - **Agent**: 持有状态的 actor。通过 [Agent::start] 启动后得到 [AgentRef]。
//! - **写入**: [AgentRef::send] 替换状态，[AgentRef::send_fn] 以函数更新状态，均为即发即忘。
//! - **读取**: [AgentRef::read_async] 在 agent 的任务上回调快照；[AgentRef::read] 与
//!   [AgentRef::read_sync] 分别以异步和阻塞方式返回快照。
//! - **CopyStrategy**: 决定读者拿到的快照，默认 [IdentityCopy]。
//! - **ErrorHandler**: 更新或读取函数失败（panic 或返回 `Err`）时决定 agent 是否继续运行，
//!   默认 [LogAndStop] 记录日志后停止。
//!
//! 注意：panic 通过 `catch_unwind` 捕获，但进程的 panic hook 仍会先执行并打印 panic 信息。
//! 如果只需要 ErrorHandler 的日志，可以用 [std::panic::set_hook] 安装更安静的 hook。
//!
//! ## 生命周期
//!
//! agent 停止后，mailbox 中尚未处理的消息全部丢弃；等待中的读取会立即得到
//! [AgentError::Abandoned]，之后的调用得到 [AgentError::Stopped]，不会永久阻塞。
//! 所有 [AgentRef] 释放后，agent 处理完已入队的消息后自然结束。
//!
//! ## 示例
//!
//! ```rust
//! use std::collections::HashMap;
//! use acty_agent::{Agent, LogAndContinue};
//!
//! #[tokio::main]
//! async fn main() {
//!     let cart = Agent::new(HashMap::<String, u32>::new())
//!         .name("cart")
//!         .error_handler(LogAndContinue)
//!         .start();
//!
//!     cart.send_fn(|items| {
//!         let mut items = items.clone();
//!         *items.entry("Pilsner".to_string()).or_default() += 1;
//!         items
//!     })
//!     .unwrap();
//!
//!     // 读取在其之前入队的所有写入生效后执行
//!     let items = cart.read().await.unwrap();
//!     assert_eq!(items.get("Pilsner"), Some(&1));
//!
//!     cart.close().await;
//! }
//! ```
//!
//! 更多示例请看 demos 目录。

mod actor;
mod agent;
mod agent_ref;
mod copy;
mod error;
mod handler;
mod message;
mod outbox;
mod start;

pub use {
    actor::{Actor, Inbox},
    agent::Agent,
    agent_ref::AgentRef,
    copy::{CopyStrategy, DeepCopy, IdentityCopy},
    error::{AgentError, AgentResult, BoxError, Cause, Failure},
    handler::{ErrorHandler, LogAndContinue, LogAndStop, Resolution},
    message::Message,
    outbox::{AsyncClose, Outbox, UnboundedOutbox},
    start::ActorExt,
};
