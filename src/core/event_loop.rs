//! # The event loop: construction, dispatch surface and teardown.
//!
//! [`EventLoop`] wires the pieces together: construction spawns the single
//! processing task (the loop is running as soon as `new` returns), the
//! dispatch methods feed the intake channel, `subscribe` attaches live
//! multicast views, and `destroy` tears everything down exactly once.
//!
//! ## Lifecycle
//! ```text
//! new()/with_processors() ──► RUNNING (processing task spawned)
//! destroy()               ──► DESTROYED (terminal, idempotent)
//!                              ├─ further dispatch → Err(LoopClosed)
//!                              ├─ every Subscription completes (None)
//!                              └─ closed() tokens fire
//! ```
//!
//! Dropping the loop handle has the same effect as `destroy()`.
//!
//! ## Example
//! ```rust
//! use evloop::{EventLoop, EventMessage};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let event_loop = EventLoop::new();
//!     let mut sub = event_loop.subscribe();
//!
//!     event_loop.dispatch(EventMessage::with_payload("TEST")).unwrap();
//!     let msg = sub.recv().await.unwrap();
//!     assert_eq!(msg.payload_ref::<&str>(), Some(&"TEST"));
//!
//!     event_loop.destroy();
//!     assert!(sub.recv().await.is_none());
//! }
//! ```

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::config::LoopConfig;
use crate::core::multicast::MulticastCore;
use crate::core::sink::DispatchSink;
use crate::core::subscription::Subscription;
use crate::error::DispatchError;
use crate::handlers::EventHandler;
use crate::messages::{EventMessage, EventType};
use crate::processing::pipeline::Pipeline;
use crate::processing::EventProcessor;

/// Process-wide multicast event loop.
///
/// One instance owns one pipeline; hold it by reference (or `Arc`) and pass
/// it to producers and consumers explicitly. Must be created inside a tokio
/// runtime, since construction spawns the processing task.
pub struct EventLoop {
    sink: DispatchSink,
    multicast: Arc<MulticastCore>,
    token: CancellationToken,
}

impl EventLoop {
    /// Creates a loop with no processors (every message passes through
    /// unchanged, task messages still execute).
    pub fn new() -> Self {
        Self::with_processors(Vec::new())
    }

    /// Creates a loop with an ordered processor chain, fixed thereafter.
    pub fn with_processors(processors: Vec<Arc<dyn EventProcessor>>) -> Self {
        Self::with_config(LoopConfig::default(), processors)
    }

    /// Creates a loop with explicit configuration.
    pub fn with_config(cfg: LoopConfig, processors: Vec<Arc<dyn EventProcessor>>) -> Self {
        let token = CancellationToken::new();
        let (tx, rx) = mpsc::unbounded_channel();
        let multicast = Arc::new(MulticastCore::new(cfg.subscription_capacity_clamped()));

        Self::spawn_processing_task(
            rx,
            Pipeline::new(processors),
            Arc::clone(&multicast),
            token.clone(),
        );

        Self {
            sink: DispatchSink::new(tx, token.clone()),
            multicast,
            token,
        }
    }

    /// The single consumer of the intake channel: applies the pipeline once
    /// per inbound message and fans the batch out. Exits on destruction (or
    /// when the loop handle is dropped, which closes the intake channel) and
    /// completes every subscription on the way out.
    fn spawn_processing_task(
        mut rx: mpsc::UnboundedReceiver<EventMessage>,
        pipeline: Pipeline,
        multicast: Arc<MulticastCore>,
        token: CancellationToken,
    ) {
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    inbound = rx.recv() => match inbound {
                        Some(message) => {
                            for out in pipeline.run(message) {
                                multicast.emit(&out);
                            }
                        }
                        None => break,
                    },
                }
            }
            multicast.close();
        });
    }

    /// Dispatches one message; non-blocking for the caller.
    ///
    /// Messages from one caller are processed in dispatch order; across
    /// concurrent callers only each caller's own order is guaranteed.
    pub fn dispatch(&self, message: EventMessage) -> Result<(), DispatchError> {
        self.sink.push(message)
    }

    /// Dispatches a finite sequence of messages, preserving its order.
    pub fn dispatch_all<I>(&self, messages: I) -> Result<(), DispatchError>
    where
        I: IntoIterator<Item = EventMessage>,
    {
        self.sink.push_all(messages)
    }

    /// Dispatches a (possibly infinite) stream of messages.
    ///
    /// Returns immediately; a forwarding task pushes each item as it
    /// resolves and stops when the stream ends or the loop is destroyed.
    pub fn dispatch_stream<S>(&self, stream: S)
    where
        S: futures::Stream<Item = EventMessage> + Send + 'static,
    {
        self.sink.push_stream(stream)
    }

    /// Dispatches one pending message once the future resolves.
    ///
    /// Returns immediately; resolution after destruction is a no-op.
    pub fn dispatch_pending<F>(&self, pending: F)
    where
        F: Future<Output = EventMessage> + Send + 'static,
    {
        self.sink.push_pending(pending)
    }

    /// Attaches a new live subscription over the processed output.
    ///
    /// Each call yields an independent view: its own copy of every message
    /// from this moment on, completing cleanly at destruction. After
    /// `destroy()` the subscription is already complete.
    pub fn subscribe(&self) -> Subscription {
        self.multicast.attach(None)
    }

    /// Like [`subscribe`](EventLoop::subscribe), restricted to one event
    /// type. The filter applies at fan-out, so the subscription's queue
    /// capacity is never consumed by messages of other types.
    ///
    /// ## Example
    /// ```no_run
    /// # use evloop::{EventLoop, EventType};
    /// # fn demo(event_loop: &EventLoop) {
    /// let keys = event_loop.subscribe_to(EventType::Key);
    /// # }
    /// ```
    pub fn subscribe_to(&self, event_type: EventType) -> Subscription {
        self.multicast.attach(Some(event_type))
    }

    /// Attaches a push-style handler driven by a dedicated worker task.
    ///
    /// The worker drains its own subscription, isolates handler panics, and
    /// exits when the loop is destroyed. The returned handle completes when
    /// the worker does; await it to join the handler during teardown.
    pub fn attach(&self, handler: Arc<dyn EventHandler>) -> JoinHandle<()> {
        let mut sub = self.subscribe();
        tokio::spawn(async move {
            while let Some(message) = sub.recv().await {
                let fut = handler.on_event(&message);
                if std::panic::AssertUnwindSafe(fut).catch_unwind().await.is_err() {
                    warn!(handler = handler.name(), "handler panicked; continuing");
                }
            }
        })
    }

    /// Destroys the loop: stops intake, completes every subscription within
    /// bounded time, and fires [`closed`](EventLoop::closed) tokens.
    ///
    /// Idempotent; repeated calls are no-ops and already-completed
    /// subscriptions see no duplicate completion.
    pub fn destroy(&self) {
        self.token.cancel();
    }

    /// True once [`destroy`](EventLoop::destroy) has been called.
    pub fn is_destroyed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Returns a token cancelled at destruction.
    ///
    /// Lets collaborators tie their own cleanup to the loop's lifetime
    /// without holding the loop itself.
    pub fn closed(&self) -> CancellationToken {
        self.token.child_token()
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EventLoop {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
