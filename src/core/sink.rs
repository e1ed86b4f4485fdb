//! # Dispatch sink: ingestion normalization.
//!
//! [`DispatchSink`] owns no loop state beyond the intake sender and the
//! lifecycle token. It funnels every ingestion shape into identical pushes
//! on the intake channel:
//!
//! - single message: synchronous, non-blocking push;
//! - iterator: synchronous pushes, preserving iteration order;
//! - stream / pending value: a spawned forwarding task pushes items as they
//!   resolve, preserving per-call order and aborting on loop destruction.
//!
//! Pushes after destruction fail with
//! [`DispatchError::LoopClosed`](crate::DispatchError::LoopClosed) and never
//! block the caller.

use std::future::Future;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::DispatchError;
use crate::messages::EventMessage;

/// Stateless normalizer feeding the processing task's intake channel.
#[derive(Clone)]
pub(crate) struct DispatchSink {
    tx: mpsc::UnboundedSender<EventMessage>,
    token: CancellationToken,
}

impl DispatchSink {
    pub(crate) fn new(tx: mpsc::UnboundedSender<EventMessage>, token: CancellationToken) -> Self {
        Self { tx, token }
    }

    /// Pushes one message; never blocks.
    pub(crate) fn push(&self, message: EventMessage) -> Result<(), DispatchError> {
        if self.token.is_cancelled() {
            return Err(DispatchError::LoopClosed);
        }
        self.tx.send(message).map_err(|_| DispatchError::LoopClosed)
    }

    /// Pushes a finite batch in iteration order.
    pub(crate) fn push_all<I>(&self, messages: I) -> Result<(), DispatchError>
    where
        I: IntoIterator<Item = EventMessage>,
    {
        for message in messages {
            self.push(message)?;
        }
        Ok(())
    }

    /// Spawns a forwarding task draining `stream` into the intake channel.
    ///
    /// Items are pushed as they resolve, in stream order. The forwarder
    /// stops on stream end, loop destruction, or a failed push.
    pub(crate) fn push_stream<S>(&self, stream: S)
    where
        S: futures::Stream<Item = EventMessage> + Send + 'static,
    {
        let sink = self.clone();
        tokio::spawn(async move {
            tokio::pin!(stream);
            loop {
                tokio::select! {
                    _ = sink.token.cancelled() => break,
                    next = stream.next() => match next {
                        Some(message) => {
                            if sink.push(message).is_err() {
                                break;
                            }
                        }
                        None => break,
                    },
                }
            }
        });
    }

    /// Spawns a forwarding task pushing one pending value on resolution.
    pub(crate) fn push_pending<F>(&self, pending: F)
    where
        F: Future<Output = EventMessage> + Send + 'static,
    {
        let sink = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = sink.token.cancelled() => {}
                message = pending => {
                    // Loop may be gone by the time the value resolves.
                    let _ = sink.push(message);
                }
            }
        });
    }
}
