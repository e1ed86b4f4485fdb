//! # evloop
//!
//! **evloop** is a process-wide multicast event dispatch loop for
//! interactive terminal applications.
//!
//! It accepts heterogeneous event messages (user input, task completions,
//! system signals) from many producers, runs them through a shared
//! single-pass transformation pipeline, and delivers the identical processed
//! output to any number of independently attached subscribers. The crate is
//! designed as the dispatch core for higher-level view trees and input
//! layers; it knows nothing about rendering, key binding or command parsing.
//!
//! ## Architecture
//! ```text
//! Producers (any thread/task):
//!   dispatch(msg) ── dispatch_all(iter) ── dispatch_stream(s) ── dispatch_pending(f)
//!        │                 │                      │                    │
//!        └─────────────────┴──────────┬───────────┴────────────────────┘
//!                                     ▼
//!                          ┌──────────────────────┐
//!                          │    intake channel    │   (one unbounded mpsc)
//!                          └──────────┬───────────┘
//!                                     ▼
//!                          ┌──────────────────────┐
//!                          │   processing task    │   single consumer:
//!                          │  - processor chain   │   transform once,
//!                          │    (once per msg)    │   serialize execution
//!                          │  - TASK interception │
//!                          └──────────┬───────────┘
//!                                     ▼
//!                          ┌──────────────────────┐
//!                          │    MulticastCore     │   distribute many:
//!                          └──┬───────┬────────┬──┘   clone per subscriber
//!                             ▼       ▼        ▼
//!                        [queue 1] [queue 2] [queue N]
//!                             │       │        │
//!                        sub.recv() sub.recv() handler worker
//! ```
//!
//! ## Guarantees
//! | Property            | Meaning                                                       |
//! |---------------------|---------------------------------------------------------------|
//! | **Multicast**       | Every attached subscription gets its own copy of each message |
//! | **Single pass**     | Processors run once per message, never once per subscriber    |
//! | **Hot**             | Processing (tasks included) runs with zero subscribers        |
//! | **Live**            | New subscriptions see only messages dispatched from then on   |
//! | **Serialized**      | One message's chain never interleaves with another's          |
//! | **Clean shutdown**  | `destroy()` completes every subscription, never errors them   |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicI64, Ordering};
//! use evloop::{EventLoop, EventMessage, EventProcessor, MessageBuilder};
//!
//! /// Tags every message with a strictly increasing counter.
//! #[derive(Default)]
//! struct Counting {
//!     count: AtomicI64,
//! }
//!
//! impl EventProcessor for Counting {
//!     fn can_process(&self, _message: &EventMessage) -> bool {
//!         true
//!     }
//!
//!     fn process(&self, message: &EventMessage) -> Vec<EventMessage> {
//!         let n = self.count.fetch_add(1, Ordering::Relaxed);
//!         vec![MessageBuilder::from_message(message).header("count", n).build()]
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let event_loop = EventLoop::with_processors(vec![Arc::new(Counting::default())]);
//!
//!     let mut first = event_loop.subscribe();
//!     let mut second = event_loop.subscribe();
//!
//!     event_loop.dispatch(EventMessage::with_payload("TEST")).unwrap();
//!
//!     // Both subscribers observe the same processed message: count == 0.
//!     let a = first.recv().await.unwrap();
//!     let b = second.recv().await.unwrap();
//!     assert_eq!(a.header("count").and_then(|v| v.as_i64()), Some(0));
//!     assert_eq!(b.header("count").and_then(|v| v.as_i64()), Some(0));
//!
//!     event_loop.destroy();
//!     assert!(first.recv().await.is_none());
//! }
//! ```

mod config;
mod core;
mod error;
mod handlers;
mod messages;
mod processing;

// ---- Public re-exports ----

pub use config::LoopConfig;
pub use crate::core::{EventLoop, Subscription};
pub use error::DispatchError;
pub use handlers::EventHandler;
pub use messages::{EventMessage, EventType, HeaderValue, MessageBuilder, TaskWork};
pub use processing::EventProcessor;
