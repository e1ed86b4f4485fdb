//! # Core handler trait.
//!
//! `EventHandler` is the extension point for push-style consumers (loggers,
//! redraw schedulers, metrics). Each attached handler is driven by its own
//! worker task fed from a private subscription queue.
//!
//! ## Contract
//! - Implementations may be slow (I/O, batching); they never block the
//!   pipeline or other consumers, only their own queue.
//! - Panics inside `on_event` are caught and reported; the worker keeps
//!   running.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use evloop::{EventHandler, EventMessage, EventType};
//!
//! struct RedrawScheduler;
//!
//! #[async_trait]
//! impl EventHandler for RedrawScheduler {
//!     async fn on_event(&self, message: &EventMessage) {
//!         if message.event_type() == &EventType::Signal {
//!             // schedule a redraw...
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "redraw"
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::messages::EventMessage;

/// Contract for push-style event consumers.
///
/// Called from a handler-dedicated worker task; implementations should
/// prefer async I/O and cooperative waits over blocking the runtime.
#[async_trait]
pub trait EventHandler: Send + Sync + 'static {
    /// Handles one processed message.
    async fn on_event(&self, message: &EventMessage);

    /// Human-readable name (for log attribution).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
