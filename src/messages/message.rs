//! # Immutable event messages and their builder.
//!
//! [`EventMessage`] bundles an opaque payload, a header map and an
//! [`EventType`] tag. Messages are immutable once built: deriving a variant
//! (e.g. a processor attaching a header) goes through
//! [`MessageBuilder::from_message`], which shares the payload and copies the
//! headers.
//!
//! ## Rules
//! - The type tag is fixed at construction and never changes.
//! - Header keys are unique; setting a key twice on the builder keeps the
//!   last value.
//! - Cloning a message is cheap (payload and headers are `Arc`-backed); every
//!   subscriber receives its own clone.
//!
//! ## Example
//! ```rust
//! use evloop::{EventType, MessageBuilder};
//!
//! let msg = MessageBuilder::with_payload("TEST")
//!     .event_type(EventType::Key)
//!     .header("repeat", 3)
//!     .build();
//!
//! assert_eq!(msg.payload_ref::<&str>(), Some(&"TEST"));
//! assert_eq!(msg.event_type(), &EventType::Key);
//! assert_eq!(msg.header("repeat").and_then(|v| v.as_i64()), Some(3));
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::headers::HeaderValue;
use super::kind::EventType;
use super::task::TaskWork;

/// Immutable unit of data flowing through the loop.
///
/// Carries an opaque payload (`Any`), a map of typed headers and the
/// [`EventType`] tag consumed by the task-interception stage.
#[derive(Clone)]
pub struct EventMessage {
    event_type: EventType,
    payload: Arc<dyn Any + Send + Sync>,
    headers: Arc<HashMap<String, HeaderValue>>,
}

impl EventMessage {
    /// Builds an untyped message from a payload alone.
    ///
    /// Shorthand for `MessageBuilder::with_payload(payload).build()`; the
    /// tag defaults to [`EventType::System`].
    pub fn with_payload(payload: impl Any + Send + Sync) -> Self {
        MessageBuilder::with_payload(payload).build()
    }

    /// Builds a task message wrapping a zero-argument closure.
    ///
    /// The loop invokes the closure exactly once on the processing task,
    /// then forwards the message to subscribers.
    ///
    /// ## Example
    /// ```rust
    /// use evloop::EventMessage;
    ///
    /// let msg = EventMessage::task(|| println!("scheduled"));
    /// assert!(msg.is_task());
    /// ```
    pub fn task(f: impl Fn() + Send + Sync + 'static) -> Self {
        MessageBuilder::with_payload(TaskWork::new(f))
            .event_type(EventType::Task)
            .build()
    }

    /// Returns the type tag.
    pub fn event_type(&self) -> &EventType {
        &self.event_type
    }

    /// Returns the header value under `key`, if present.
    pub fn header(&self, key: &str) -> Option<&HeaderValue> {
        self.headers.get(key)
    }

    /// Returns the full header map.
    pub fn headers(&self) -> &HashMap<String, HeaderValue> {
        &self.headers
    }

    /// Downcasts the payload to a concrete type.
    pub fn payload_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// True iff this message carries executable work: the tag is
    /// [`EventType::Task`] and the payload is a [`TaskWork`].
    pub fn is_task(&self) -> bool {
        self.event_type.is_task() && self.payload.is::<TaskWork>()
    }

    /// Returns the work item for a task message.
    pub fn task_work(&self) -> Option<&TaskWork> {
        if self.event_type.is_task() {
            self.payload_ref::<TaskWork>()
        } else {
            None
        }
    }
}

impl fmt::Debug for EventMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventMessage")
            .field("event_type", &self.event_type)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Builder for [`EventMessage`].
///
/// Start from [`MessageBuilder::with_payload`] for a fresh message or
/// [`MessageBuilder::from_message`] to derive a variant sharing the original
/// payload.
pub struct MessageBuilder {
    event_type: EventType,
    payload: Arc<dyn Any + Send + Sync>,
    headers: HashMap<String, HeaderValue>,
}

impl MessageBuilder {
    /// Starts a builder from a payload; the tag defaults to
    /// [`EventType::System`].
    pub fn with_payload(payload: impl Any + Send + Sync) -> Self {
        Self {
            event_type: EventType::System,
            payload: Arc::new(payload),
            headers: HashMap::new(),
        }
    }

    /// Starts a builder from an existing message, sharing its payload and
    /// copying its headers and tag.
    ///
    /// This is the processor idiom for emitting an annotated variant:
    ///
    /// ```rust
    /// use evloop::{EventMessage, MessageBuilder};
    ///
    /// let original = EventMessage::with_payload("TEST");
    /// let tagged = MessageBuilder::from_message(&original)
    ///     .header("count", 0)
    ///     .build();
    /// assert_eq!(tagged.payload_ref::<&str>(), Some(&"TEST"));
    /// ```
    pub fn from_message(message: &EventMessage) -> Self {
        Self {
            event_type: message.event_type.clone(),
            payload: Arc::clone(&message.payload),
            headers: (*message.headers).clone(),
        }
    }

    /// Sets the type tag.
    pub fn event_type(mut self, event_type: EventType) -> Self {
        self.event_type = event_type;
        self
    }

    /// Sets a header; setting the same key twice keeps the last value.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<HeaderValue>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Finalizes the message; it is immutable from here on.
    pub fn build(self) -> EventMessage {
        EventMessage {
            event_type: self.event_type,
            payload: self.payload,
            headers: Arc::new(self.headers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_type_is_system() {
        let msg = EventMessage::with_payload("TEST");
        assert_eq!(msg.event_type(), &EventType::System);
        assert!(!msg.is_task());
    }

    #[test]
    fn test_header_last_write_wins() {
        let msg = MessageBuilder::with_payload(())
            .header("count", 1)
            .header("count", 2)
            .build();
        assert_eq!(msg.header("count").and_then(|v| v.as_i64()), Some(2));
        assert_eq!(msg.headers().len(), 1);
    }

    #[test]
    fn test_from_message_shares_payload_and_copies_headers() {
        let original = MessageBuilder::with_payload(String::from("payload"))
            .event_type(EventType::Key)
            .header("a", 1)
            .build();
        let derived = MessageBuilder::from_message(&original).header("b", 2).build();

        assert_eq!(derived.event_type(), &EventType::Key);
        assert_eq!(derived.payload_ref::<String>().map(String::as_str), Some("payload"));
        assert_eq!(derived.header("a").and_then(|v| v.as_i64()), Some(1));
        assert_eq!(derived.header("b").and_then(|v| v.as_i64()), Some(2));
        // The original is untouched.
        assert!(original.header("b").is_none());
    }

    #[test]
    fn test_task_detection_requires_tag_and_payload() {
        let task = EventMessage::task(|| {});
        assert!(task.is_task());
        assert!(task.task_work().is_some());

        // Task tag without invokable payload does not qualify.
        let not_task = MessageBuilder::with_payload("TEST")
            .event_type(EventType::Task)
            .build();
        assert!(!not_task.is_task());
        assert!(not_task.task_work().is_none());

        // Invokable payload without the tag does not qualify either.
        let untagged = MessageBuilder::with_payload(TaskWork::new(|| {})).build();
        assert!(!untagged.is_task());
        assert!(untagged.task_work().is_none());
    }

    #[test]
    fn test_payload_downcast_mismatch() {
        let msg = EventMessage::with_payload(42i32);
        assert_eq!(msg.payload_ref::<i32>(), Some(&42));
        assert!(msg.payload_ref::<String>().is_none());
    }
}
