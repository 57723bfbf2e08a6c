use crate::metrics::backend::{ActionOutcome, ConsoleMetrics};

/// Backend that drops every record.
///
/// The default wherever no real backend was injected, so library code
/// can report unconditionally.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl ConsoleMetrics for NoOpMetrics {
    #[inline(always)]
    fn record_trigger(&self, _: &str, _: &str) {}

    #[inline(always)]
    fn record_action_completed(&self, _: &str, _: ActionOutcome, _: u64) {}

    #[inline(always)]
    fn record_render_failure(&self, _: &str) {}
}
