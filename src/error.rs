//! Error types surfaced by the event loop.
//!
//! Only one condition reaches callers as a value: dispatching into a
//! destroyed loop. Everything else that can go wrong inside the loop
//! (processor panics, task-work panics, handler panics, subscriber
//! overflow) is contained where it happens and reported on the log channel,
//! never propagated across subscriber boundaries.

use thiserror::Error;

/// # Errors produced by dispatch calls.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The loop has been destroyed; the message was not accepted.
    #[error("event loop has been destroyed")]
    LoopClosed,
}

impl DispatchError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use evloop::DispatchError;
    ///
    /// assert_eq!(DispatchError::LoopClosed.as_label(), "loop_closed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchError::LoopClosed => "loop_closed",
        }
    }
}
