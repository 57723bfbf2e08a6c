//! Counters for the console's observable events.
//!
//! The gate, the runner and the page assembly all report through one
//! [`ConsoleMetrics`] handle: trigger submissions with their fate,
//! completed admin operations with runtime, and sections that failed to
//! render. Which backend sits behind the handle is the embedding
//! binary's choice; [`noop_metrics`] is the do-nothing default.
mod backend;
pub use backend::{ActionOutcome, ConsoleMetrics, MetricsHandle};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
