//! Event messages: the immutable unit of data flowing through the loop.
//!
//! This module groups the message **data model** used by dispatchers,
//! processors and subscribers:
//! - [`EventType`] open-ended classification tag ([`EventType::Task`] is the
//!   only kind the loop itself inspects)
//! - [`HeaderValue`] typed header values with string keys
//! - [`EventMessage`] immutable payload + headers + type tag
//! - [`MessageBuilder`] the only way to construct or derive a message
//! - [`TaskWork`] zero-argument unit of work carried by task messages
//!
//! ## Quick reference
//! - **Producers**: input capture, command execution, any code holding the
//!   loop handle.
//! - **Consumers**: [`EventProcessor`](crate::processing::EventProcessor)
//!   implementations and subscription holders.

mod headers;
mod kind;
mod message;
mod task;

pub use headers::HeaderValue;
pub use kind::EventType;
pub use message::{EventMessage, MessageBuilder};
pub use task::TaskWork;
