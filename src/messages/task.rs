//! # Executable work carried by task messages.
//!
//! [`TaskWork`] wraps a zero-argument closure. A message qualifies as a task
//! iff its type tag is [`EventType::Task`](crate::EventType::Task) **and** its
//! payload is a `TaskWork`; the loop then invokes the closure exactly once on
//! the processing task before forwarding the message downstream.
//!
//! Work items run synchronously inside the shared pipeline and should be
//! short; long-running work belongs in a spawned task that dispatches a
//! completion message instead.

use std::fmt;

/// Zero-argument unit of work executed inside the processing pipeline.
pub struct TaskWork {
    f: Box<dyn Fn() + Send + Sync>,
}

impl TaskWork {
    /// Wraps a closure as task work.
    ///
    /// Prefer [`EventMessage::task`](crate::EventMessage::task), which builds
    /// the complete task message in one call.
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self { f: Box::new(f) }
    }

    /// Invokes the work item.
    ///
    /// Called by the pipeline's task stage; panics are caught there and
    /// reported without aborting the loop.
    pub fn invoke(&self) {
        (self.f)()
    }
}

impl fmt::Debug for TaskWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TaskWork")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_invoke_runs_closure() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let work = TaskWork::new(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        work.invoke();
        work.invoke();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
