//! Shared transformation pipeline applied once per inbound message.
//!
//! ## Contents
//! - [`EventProcessor`] the pluggable transformation capability
//! - `Pipeline` (crate-internal) the ordered chain plus the
//!   task-interception stage
//!
//! Processing happens on the loop's single processing task, upstream of
//! fan-out: all present and future subscribers observe the identical
//! processed output, and a processor is never invoked once per subscriber.

pub(crate) mod pipeline;
mod processor;

pub use processor::EventProcessor;
