//! Loop core: ingestion, single-pass processing, multicast fan-out and
//! lifecycle.
//!
//! ## System wiring
//! ```text
//! Inputs (any thread/task):
//!   dispatch(msg) ─────────────┐
//!   dispatch_all(iter) ────────┤ (synchronous pushes)
//!   dispatch_stream(stream) ───┤ (forwarding task per call)
//!   dispatch_pending(future) ──┘
//!              │
//!              ▼
//!      [intake channel]                 one unbounded mpsc
//!              │
//!              ▼
//!      processing task                  single consumer; serializes the
//!        ├─ Pipeline::run(msg)          processor chain and task execution
//!        │    (processors once,
//!        │     TaskWork invoked)
//!        ▼
//!      MulticastCore::emit(&out)        try_send clone per subscription
//!        ├────────► [queue S1] ─► Subscription::recv()
//!        ├────────► [queue S2] ─► Subscription::recv()
//!        └────────► [queue SN] ─► Subscription::recv()
//!
//! Teardown:
//!   destroy() ─► CancellationToken ─► processing task exits
//!                                  ─► MulticastCore::close()
//!                                  ─► every Subscription completes (None)
//! ```
//!
//! Backpressure policy: each subscription has its own bounded queue; when a
//! queue is full the message is dropped **for that subscriber only** (with a
//! warning) and the pipeline moves on. A slow subscriber never stalls the
//! pipeline or its peers.

mod event_loop;
mod multicast;
mod sink;
mod subscription;

pub use event_loop::EventLoop;
pub use subscription::Subscription;
