//! # Per-consumer view of the processed event stream.
//!
//! A [`Subscription`] is a live cursor over the loop's output: it yields
//! messages dispatched after it was attached and completes (yields `None`)
//! exactly once when the loop is destroyed. Dropping it detaches the
//! consumer without affecting the loop or other subscriptions.
//!
//! Type filtering happens at fan-out, before the subscription's bounded
//! queue: a filtered view's capacity is only ever consumed by messages it
//! will actually yield.

use tokio::sync::mpsc;

use crate::messages::{EventMessage, EventType};

/// Live, independent view over the loop's processed output.
///
/// Obtained from [`EventLoop::subscribe`](crate::EventLoop::subscribe) or
/// [`EventLoop::subscribe_to`](crate::EventLoop::subscribe_to).
pub struct Subscription {
    rx: mpsc::Receiver<EventMessage>,
    filter: Option<EventType>,
}

impl Subscription {
    pub(crate) fn new(rx: mpsc::Receiver<EventMessage>, filter: Option<EventType>) -> Self {
        Self { rx, filter }
    }

    /// Receives the next processed message.
    ///
    /// Returns `None` exactly once, when the loop has been destroyed (clean
    /// completion, never an error). A filtered subscription only ever
    /// receives messages of its type.
    ///
    /// ## Example
    /// ```no_run
    /// # async fn demo(mut sub: evloop::Subscription) {
    /// while let Some(msg) = sub.recv().await {
    ///     println!("{:?}", msg.event_type());
    /// }
    /// // Loop destroyed; stream completed.
    /// # }
    /// ```
    pub async fn recv(&mut self) -> Option<EventMessage> {
        self.rx.recv().await
    }

    /// Non-blocking variant of [`recv`](Subscription::recv).
    ///
    /// Returns `None` both when no message is queued and after completion;
    /// use `recv` to distinguish the two.
    pub fn try_recv(&mut self) -> Option<EventMessage> {
        self.rx.try_recv().ok()
    }

    /// Returns the type filter, if this subscription was created with one.
    pub fn filter(&self) -> Option<&EventType> {
        self.filter.as_ref()
    }
}
