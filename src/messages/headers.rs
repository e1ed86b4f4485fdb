//! # Typed header values.
//!
//! Message headers map unique string keys to [`HeaderValue`]s. The loop
//! itself never reads headers; they exist for processors and subscribers to
//! attach derived metadata (counters, focus flags, origin markers, ...).

use std::sync::Arc;

/// Value stored under a header key.
///
/// Cheap to clone; string values are `Arc`-backed.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    /// Text value.
    Str(Arc<str>),
    /// Integer value (counters, sizes, coordinates).
    Int(i64),
    /// Boolean flag.
    Bool(bool),
}

impl HeaderValue {
    /// Returns the text value, if this is [`HeaderValue::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HeaderValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer value, if this is [`HeaderValue::Int`].
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            HeaderValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is [`HeaderValue::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HeaderValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(s: &str) -> Self {
        HeaderValue::Str(Arc::from(s))
    }
}

impl From<String> for HeaderValue {
    fn from(s: String) -> Self {
        HeaderValue::Str(Arc::from(s.as_str()))
    }
}

impl From<i64> for HeaderValue {
    fn from(n: i64) -> Self {
        HeaderValue::Int(n)
    }
}

impl From<i32> for HeaderValue {
    fn from(n: i32) -> Self {
        HeaderValue::Int(i64::from(n))
    }
}

impl From<u32> for HeaderValue {
    fn from(n: u32) -> Self {
        HeaderValue::Int(i64::from(n))
    }
}

impl From<bool> for HeaderValue {
    fn from(b: bool) -> Self {
        HeaderValue::Bool(b)
    }
}
