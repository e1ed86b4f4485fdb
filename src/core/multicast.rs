//! # Multicast fan-out over dynamically attached subscriptions.
//!
//! [`MulticastCore`] keeps a registry of per-subscription senders and pushes
//! each processed message to every live one. It is the "distribute many"
//! half of the loop's "transform once, distribute many" invariant.
//!
//! ## Rules
//! - **Live only**: a subscription attached mid-stream sees only messages
//!   emitted after attachment; there is no history replay.
//! - **Independent copies**: each subscription receives its own clone of
//!   every message; cancelling one never affects the others.
//! - **Non-blocking emit**: a full subscription queue drops the message for
//!   that subscription only (warn); closed queues are pruned in place.
//! - **Filters apply at fan-out**: a typed subscription's queue only ever
//!   holds matching messages, so its capacity reflects its own lag, not
//!   unrelated traffic.
//! - **Single close**: `close()` drops every sender exactly once, completing
//!   all attached subscriptions; attaching afterwards yields an
//!   already-completed subscription.

use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::warn;

use crate::core::subscription::Subscription;
use crate::messages::{EventMessage, EventType};

/// Per-subscription channel with its optional type filter.
struct Channel {
    tx: mpsc::Sender<EventMessage>,
    filter: Option<EventType>,
}

/// Registry state; `closed` lives under the same lock so an attach racing a
/// close can never register a sender that would outlive the loop.
struct Registry {
    channels: Vec<Channel>,
    closed: bool,
}

/// Shared fan-out registry feeding all subscriptions.
pub(crate) struct MulticastCore {
    capacity: usize,
    registry: Mutex<Registry>,
}

impl MulticastCore {
    /// Creates the core; `capacity` is the per-subscription queue size.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            registry: Mutex::new(Registry {
                channels: Vec::new(),
                closed: false,
            }),
        }
    }

    /// Attaches a new subscription, optionally filtered to one event type.
    ///
    /// After `close()`, the returned subscription completes immediately.
    pub(crate) fn attach(&self, filter: Option<EventType>) -> Subscription {
        let (tx, rx) = mpsc::channel(self.capacity);
        {
            let mut registry = self.lock_registry();
            if !registry.closed {
                registry.channels.push(Channel {
                    tx,
                    filter: filter.clone(),
                });
            }
            // Closed: tx drops here and recv() observes completion at once.
        }
        Subscription::new(rx, filter)
    }

    /// Delivers one processed message to every live subscription whose
    /// filter matches.
    ///
    /// Called from the processing task only; never blocks.
    pub(crate) fn emit(&self, message: &EventMessage) {
        let mut registry = self.lock_registry();
        registry.channels.retain(|channel| {
            if let Some(filter) = &channel.filter {
                if message.event_type() != filter {
                    return true;
                }
            }
            match channel.tx.try_send(message.clone()) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!(
                        event_type = %message.event_type(),
                        "subscription queue full; dropping message for this subscriber"
                    );
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => false,
            }
        });
    }

    /// Completes every attached subscription and rejects future attaches.
    ///
    /// Idempotent; subsequent calls are no-ops.
    pub(crate) fn close(&self) {
        let mut registry = self.lock_registry();
        registry.closed = true;
        registry.channels.clear();
    }

    /// Number of currently attached subscriptions (pruned lazily on emit).
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lock_registry().channels.len()
    }

    fn lock_registry(&self) -> std::sync::MutexGuard<'_, Registry> {
        // Registry operations never panic while holding the lock, so a
        // poisoned mutex can only come from a prior panic elsewhere in this
        // module; recover the data rather than propagate the poison.
        self.registry.lock().unwrap_or_else(|e| e.into_inner())
    }
}
