//! # Example: counting_processor
//!
//! Shows the single-pass guarantee: a stateful processor tags each message
//! with a strictly increasing counter, and every subscriber observes the
//! identical tagged value for the same dispatched message.
//!
//! ## Flow
//! ```text
//! dispatch(msg) ──► Counting.process()  (runs ONCE per message)
//!                        │ header count=n
//!                        ▼
//!                    fan-out ──► sub A sees count=n
//!                            └─► sub B sees count=n   (same n, always)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example counting_processor
//! ```

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use evloop::{EventLoop, EventMessage, EventProcessor, MessageBuilder};

/// Tags every message with a strictly increasing counter.
#[derive(Default)]
struct Counting {
    count: AtomicI64,
}

impl EventProcessor for Counting {
    fn can_process(&self, _message: &EventMessage) -> bool {
        true
    }

    fn process(&self, message: &EventMessage) -> Vec<EventMessage> {
        let n = self.count.fetch_add(1, Ordering::SeqCst);
        vec![MessageBuilder::from_message(message).header("count", n).build()]
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt::init();

    let event_loop = EventLoop::with_processors(vec![Arc::new(Counting::default())]);

    let mut a = event_loop.subscribe();
    let mut b = event_loop.subscribe();

    for payload in ["first", "second", "third"] {
        event_loop
            .dispatch(EventMessage::with_payload(payload))
            .expect("loop is running");
    }

    for _ in 0..3 {
        let from_a = a.recv().await.expect("loop still live");
        let from_b = b.recv().await.expect("loop still live");
        let count_a = from_a.header("count").and_then(|v| v.as_i64());
        let count_b = from_b.header("count").and_then(|v| v.as_i64());
        println!("a saw count={count_a:?}, b saw count={count_b:?}");
        assert_eq!(count_a, count_b);
    }

    event_loop.destroy();
}
