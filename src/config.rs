//! # Loop configuration.
//!
//! Provides [`LoopConfig`], the knobs fixed at loop construction.
//!
//! ## Sentinel values
//! - `subscription_capacity` is clamped to a minimum of 1 by the loop.

/// Configuration for an [`EventLoop`](crate::EventLoop) instance.
///
/// ## Field semantics
/// - `subscription_capacity`: size of each subscription's private queue.
///   When a subscriber falls behind by more than this many messages, further
///   messages are dropped **for that subscriber only** (with a warning);
///   the pipeline and other subscribers are unaffected.
#[derive(Clone, Debug)]
pub struct LoopConfig {
    /// Per-subscription queue capacity (min 1; clamped by the loop).
    pub subscription_capacity: usize,
}

impl LoopConfig {
    /// Returns the subscription capacity clamped to a minimum of 1.
    #[inline]
    pub fn subscription_capacity_clamped(&self) -> usize {
        self.subscription_capacity.max(1)
    }
}

impl Default for LoopConfig {
    /// Default configuration:
    ///
    /// - `subscription_capacity = 1024` (ample headroom for interactive use)
    fn default() -> Self {
        Self {
            subscription_capacity: 1024,
        }
    }
}
