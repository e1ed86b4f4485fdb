//! Push-style consumers for code that prefers callbacks over polling a
//! [`Subscription`](crate::Subscription).
//!
//! [`EventLoop::attach`](crate::EventLoop::attach) spawns one worker task
//! per handler; the worker drains a private subscription and invokes
//! [`EventHandler::on_event`] per message. A slow or panicking handler
//! affects only its own queue, never the pipeline or other consumers.

mod handler;

pub use handler::EventHandler;
