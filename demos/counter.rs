//! Counter Agent Example
//!
//! This example demonstrates a counter held by an Agent:
//! - Fire-and-forget updates from several threads
//! - Blocking reads from a plain thread (`read_sync`)
//! - The default error handler stopping the agent after a failure
use acty_agent::{Agent, AgentError};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .with_writer(std::io::stderr)
        .init();

    let runtime = tokio::runtime::Runtime::new().expect("failed to build runtime");
    let counter = Agent::new(0_u64).name("counter").start_on(runtime.handle());

    // Two writers, each incrementing 1000 times
    let writers: Vec<_> = (0..2)
        .map(|_| {
            let counter = counter.clone();
            std::thread::spawn(move || {
                for _ in 0..1_000 {
                    counter.send_fn(|n| n + 1).unwrap_or(());
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().expect("writer panicked");
    }

    println!("count: {:?}", counter.read_sync());

    // With the default handler a single failing update stops the agent
    counter.send_fn(|_| panic!("counter overflowed")).unwrap_or(());
    runtime.block_on(counter.stopped());

    assert_eq!(counter.send(0), Err(AgentError::Stopped));
    println!("after failure: {:?}", counter.read_sync());
}
