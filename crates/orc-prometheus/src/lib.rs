//! Prometheus backend for the console metrics seam.
//!
//! [`PrometheusMetrics`] implements [`orc_core::ConsoleMetrics`] on top of
//! a dedicated [`Registry`]. Construct one at startup, coerce a clone into
//! an [`orc_core::MetricsHandle`] for the gate and the page assembly, and
//! keep the original around so an HTTP handler can
//! [`gather`](PrometheusMetrics::gather) the families for scraping.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use orc_core::MetricsHandle;
//! use orc_prometheus::PrometheusMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let prometheus = PrometheusMetrics::new()?;
//! let handle: MetricsHandle = Arc::new(prometheus.clone());
//! // `handle` goes to ActionGate::with_metrics / ConsoleCore::with_metrics;
//! // `prometheus.gather()` feeds the /metrics endpoint.
//! # Ok(())
//! # }
//! ```
//!
//! Exported families:
//! - `orc_console_triggers_total{action, outcome}` counts every processed
//!   trigger submission.
//! - `orc_console_actions_completed_total{action, outcome}` counts finished
//!   background operations.
//! - `orc_console_action_duration_seconds{action}` histograms their
//!   wall-clock runtime.
//! - `orc_console_render_failures_total{section}` counts status sections
//!   that degraded to empty.
//!
//! Serving `/metrics` is left to the embedding binary; anything that can
//! return [`TextEncoder`] output works.

mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Encoder, Registry, TextEncoder};
