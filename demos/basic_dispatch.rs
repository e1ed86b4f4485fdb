//! # Example: basic_dispatch
//!
//! Minimal example of dispatching messages into the loop and consuming them
//! from two independent subscriptions.
//!
//! Demonstrates how to:
//! - Create an [`EventLoop`] with no processors.
//! - Dispatch a single message and a finite batch.
//! - Drain subscriptions concurrently and destroy the loop cleanly.
//!
//! ## Flow
//! ```text
//! dispatch("hello") ──► intake ──► processing task ──► fan-out
//!                                                       ├─► subscription A
//!                                                       └─► subscription B
//! destroy() ──► both subscriptions complete
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic_dispatch
//! ```

use evloop::{EventLoop, EventMessage, MessageBuilder};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Surface the loop's drop/panic warnings on stderr
    tracing_subscriber::fmt::init();

    // 1. Create the loop; it is running as soon as `new` returns
    let event_loop = EventLoop::new();

    // 2. Attach two independent subscriptions
    let mut a = event_loop.subscribe();
    let mut b = event_loop.subscribe();

    // 3. Dispatch a single message plus a batch
    event_loop
        .dispatch(EventMessage::with_payload("hello"))
        .expect("loop is running");
    event_loop
        .dispatch_all((1..=3i32).map(|n| {
            MessageBuilder::with_payload(n).header("batch", true).build()
        }))
        .expect("loop is running");

    // 4. Each subscription observes its own copy of all four messages
    for _ in 0..4 {
        let msg = a.recv().await.expect("loop still live");
        println!("[a] {:?}", msg);
    }
    for _ in 0..4 {
        let msg = b.recv().await.expect("loop still live");
        println!("[b] {:?}", msg);
    }

    // 5. Tear down; both subscriptions complete with `None`
    event_loop.destroy();
    assert!(a.recv().await.is_none());
    assert!(b.recv().await.is_none());
    println!("loop destroyed, subscriptions completed");
}
