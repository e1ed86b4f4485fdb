//! # Single-pass processor chain with task interception.
//!
//! [`Pipeline`] owns the ordered processor list and turns one inbound
//! message into the outbound batch every subscriber will observe.
//!
//! ## Stages
//! ```text
//! inbound ──► [processor chain] ──► flatten ──► [task stage] ──► outbound batch
//!              every processor        concat      invoke TaskWork
//!              evaluated, accepted    in reg.     exactly once per
//!              outputs kept           order       task message
//! ```
//!
//! ## Rules
//! - Zero acceptances ⇒ identity passthrough (the inbound message itself).
//! - A processor that panics (in `can_process` or `process`) loses its
//!   contribution for that message only; the chain continues.
//! - Task work panicking is reported and the message is still forwarded,
//!   so subscribers can observe that the task was attempted.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tracing::warn;

use crate::messages::EventMessage;
use crate::processing::EventProcessor;

/// Ordered processor chain plus the task-interception stage.
///
/// Owned by the processing task; `run` is invoked once per inbound message,
/// never per subscriber.
pub(crate) struct Pipeline {
    processors: Vec<Arc<dyn EventProcessor>>,
}

impl Pipeline {
    pub(crate) fn new(processors: Vec<Arc<dyn EventProcessor>>) -> Self {
        Self { processors }
    }

    /// Produces the outbound batch for one inbound message.
    ///
    /// Runs the full chain, applies identity passthrough when nothing
    /// accepted, then executes task payloads in the resulting batch.
    pub(crate) fn run(&self, message: EventMessage) -> Vec<EventMessage> {
        let mut outbound = Vec::new();
        let mut accepted = false;

        for processor in &self.processors {
            match catch_unwind(AssertUnwindSafe(|| processor.can_process(&message))) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(_) => {
                    warn!(
                        processor = processor.name(),
                        "processor panicked in can_process; skipping it for this message"
                    );
                    continue;
                }
            }
            match catch_unwind(AssertUnwindSafe(|| processor.process(&message))) {
                Ok(batch) => {
                    accepted = true;
                    outbound.extend(batch);
                }
                Err(_) => {
                    warn!(
                        processor = processor.name(),
                        "processor panicked in process; dropping its contribution"
                    );
                }
            }
        }

        if !accepted {
            outbound.push(message);
        }

        for out in &outbound {
            Self::run_task(out);
        }
        outbound
    }

    /// Invokes the work item of a task message exactly once.
    fn run_task(message: &EventMessage) {
        if !message.event_type().is_task() {
            return;
        }
        match message.task_work() {
            Some(work) => {
                if catch_unwind(AssertUnwindSafe(|| work.invoke())).is_err() {
                    warn!("task payload panicked; message still forwarded");
                }
            }
            None => {
                warn!("task-typed message without invokable payload; forwarded as-is");
            }
        }
    }
}
