use std::sync::Arc;

/// How a completed admin operation terminated, for metrics classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Operation completed successfully.
    Success,
    /// Operation reported a failure.
    Failure,
}

impl ActionOutcome {
    /// Label value for exposition.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            ActionOutcome::Success => "success",
            ActionOutcome::Failure => "failure",
        }
    }
}

/// Recording interface implemented by metrics backends.
///
/// One handle is shared by the gate, the runner and the page assembly;
/// implementations must tolerate concurrent calls from all three.
pub trait ConsoleMetrics: Send + Sync + 'static {
    /// Record one processed trigger request.
    ///
    /// Called for every submission, whatever its fate; the wire response
    /// never distinguishes outcomes, the counters do.
    ///
    /// # Arguments
    /// - `action`: Action kind
    /// - `outcome`: Trigger outcome label (started, already-running, ...)
    fn record_trigger(&self, action: &str, outcome: &str);

    /// Record a completed background operation with its duration.
    ///
    /// # Arguments
    /// - `action`: Action kind
    /// - `outcome`: How the operation terminated
    /// - `duration_ms`: Wall-clock execution time in milliseconds
    fn record_action_completed(&self, action: &str, outcome: ActionOutcome, duration_ms: u64);

    /// Record a failed best-effort section render.
    ///
    /// Render failures degrade to empty sections, so counters are the only
    /// place they remain visible.
    ///
    /// # Arguments
    /// - `section`: Section title
    fn record_render_failure(&self, section: &str);
}

/// Shared handle to a metrics backend.
pub type MetricsHandle = Arc<dyn ConsoleMetrics>;
