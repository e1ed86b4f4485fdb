//! # Core processor trait.
//!
//! `EventProcessor` is the extension point for transforming messages before
//! fan-out. Processors are registered once at loop construction, in order;
//! registration order is evaluation order.
//!
//! ## Contract
//! - Every registered processor is evaluated for every message
//!   (non-exclusive); outputs of accepting processors are concatenated.
//! - If no processor accepts a message, it passes through unchanged.
//! - Invocation is serialized on the processing task: one message's chain
//!   never interleaves with another's, so processor-local mutable state
//!   needs no locking discipline beyond interior mutability.
//! - Panics in either method are caught; the processor's contribution for
//!   that message is dropped and the pipeline continues.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicI64, Ordering};
//! use evloop::{EventMessage, EventProcessor, MessageBuilder};
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
//! ```

use crate::messages::EventMessage;

/// Pluggable transformation stage applied once per message before fan-out.
///
/// Called from the loop's single processing task; implementations may keep
/// local state behind interior mutability and rely on serial invocation.
pub trait EventProcessor: Send + Sync + 'static {
    /// Decides whether this processor participates in the given message.
    fn can_process(&self, message: &EventMessage) -> bool;

    /// Transforms the message into zero or more outbound messages.
    ///
    /// Only called when [`can_process`](EventProcessor::can_process) returned
    /// `true` for the same message.
    fn process(&self, message: &EventMessage) -> Vec<EventMessage>;

    /// Human-readable name (for log attribution).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
