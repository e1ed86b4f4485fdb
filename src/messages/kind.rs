//! # Event classification tags.
//!
//! [`EventType`] is an open-ended tag: the loop core only gives structural
//! meaning to [`EventType::Task`] (its payload is executed inside the
//! pipeline). Every other variant is opaque to the core and meaningful only
//! to processors and subscribers.

use std::borrow::Cow;
use std::fmt;

/// Classification tag carried by every [`EventMessage`](crate::EventMessage).
///
/// The tag is fixed at message construction and never changes afterwards.
/// Use [`EventType::custom`] for application-defined kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Terminal signal (resize, suspend, ...).
    Signal,
    /// Key input event.
    Key,
    /// Mouse input event.
    Mouse,
    /// System-level event; also the default for untyped messages.
    System,
    /// Executable work item; the loop invokes its payload exactly once
    /// inside the processing task before forwarding the message.
    Task,
    /// Application-defined tag, opaque to the loop.
    Custom(Cow<'static, str>),
}

impl EventType {
    /// Creates an application-defined tag.
    ///
    /// ## Example
    /// ```rust
    /// use evloop::EventType;
    ///
    /// let t = EventType::custom("view");
    /// assert_eq!(t.as_str(), "view");
    /// assert!(!t.is_task());
    /// ```
    pub fn custom(name: impl Into<Cow<'static, str>>) -> Self {
        EventType::Custom(name.into())
    }

    /// Returns a short stable label (for logs and header rendering).
    pub fn as_str(&self) -> &str {
        match self {
            EventType::Signal => "signal",
            EventType::Key => "key",
            EventType::Mouse => "mouse",
            EventType::System => "system",
            EventType::Task => "task",
            EventType::Custom(name) => name,
        }
    }

    /// True for [`EventType::Task`], the only tag the loop intercepts.
    #[inline]
    pub fn is_task(&self) -> bool {
        matches!(self, EventType::Task)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_is_the_only_task_tag() {
        assert!(EventType::Task.is_task());
        assert!(!EventType::Key.is_task());
        assert!(!EventType::custom("task").is_task());
    }

    #[test]
    fn test_custom_label() {
        let t = EventType::custom(String::from("view"));
        assert_eq!(t.to_string(), "view");
    }
}
