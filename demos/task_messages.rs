//! # Example: task_messages
//!
//! Schedules work onto the loop's processing task via task messages and
//! watches the completed events flow downstream.
//!
//! Demonstrates how to:
//! - Build task messages with [`EventMessage::task`].
//! - Observe that the work runs exactly once, on the processing task,
//!   before the message reaches subscribers.
//! - Use [`EventLoop::subscribe_to`] to watch only task events.
//!
//! ## Run
//! ```bash
//! cargo run --example task_messages
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use evloop::{EventLoop, EventMessage, EventType};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt::init();

    let event_loop = EventLoop::new();
    let mut tasks = event_loop.subscribe_to(EventType::Task);

    let done = Arc::new(AtomicUsize::new(0));
    for i in 0..3usize {
        let done = Arc::clone(&done);
        event_loop
            .dispatch(EventMessage::task(move || {
                done.fetch_add(1, Ordering::SeqCst);
                println!("[work] item {i} executed on the processing task");
            }))
            .expect("loop is running");
    }

    // Noise of another type; the filtered subscription never sees it.
    event_loop
        .dispatch(EventMessage::with_payload("not a task"))
        .expect("loop is running");

    for _ in 0..3 {
        let msg = tasks.recv().await.expect("loop still live");
        assert_eq!(msg.event_type(), &EventType::Task);
    }
    println!("executed {} work items", done.load(Ordering::SeqCst));

    event_loop.destroy();
    assert!(tasks.recv().await.is_none());
}
