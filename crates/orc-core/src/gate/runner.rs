use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::{
    error::CoreError,
    instance::InstanceHandle,
    metrics::{ActionOutcome, MetricsHandle},
};

/// Long-running administrative operation triggered from the console.
///
/// Implementations perform the real work, e.g. fetching reseed data from
/// external hosts. The surrounding [`ActionRunner`] guarantees at most one
/// `run` is in flight at a time; implementations only need to do the work
/// and report progress.
#[async_trait]
pub trait AdminAction: Send + Sync + 'static {
    /// Action name used in logs, metrics and status lines.
    fn kind(&self) -> &'static str;

    /// Execute the operation against `instance`.
    ///
    /// Progress lines published through `progress` become visible on
    /// status pages while the operation runs. The returned string is the
    /// completion summary shown once the operation is done.
    async fn run(
        &self,
        instance: InstanceHandle,
        progress: ActionProgress,
    ) -> Result<String, CoreError>;
}

/// Write side of the runner status cell, handed to the running operation.
#[derive(Clone)]
pub struct ActionProgress {
    cell: Arc<Mutex<StatusCell>>,
}

impl ActionProgress {
    /// Publish a progress line, replacing the previous one.
    pub fn update(&self, message: impl Into<String>) {
        let mut cell = self.cell.lock().unwrap_or_else(PoisonError::into_inner);
        cell.message = Some(message.into());
    }
}

/// Point-in-time view of the runner for status pages.
///
/// `message` carries the latest progress line while an operation runs and
/// the completion summary afterwards; `error` carries the failure text of
/// the last operation, if it failed. Both survive until the next start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionStatus {
    /// An operation is currently running.
    pub in_flight: bool,
    /// Latest progress line or completion summary.
    pub message: Option<String>,
    /// Failure text of the last completed operation.
    pub error: Option<String>,
}

/// Result of asking the runner to start one more operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new operation was spawned.
    Started,
    /// An operation was already in flight; the request was dropped and the
    /// caller still sees success.
    AlreadyRunning,
}

#[derive(Default)]
struct StatusCell {
    message: Option<String>,
    error: Option<String>,
}

/// Singleton task runner for one admin action, bound to one instance.
///
/// Created lazily by [`crate::ActionGate`] on the first accepted trigger
/// and reused for the lifetime of the process. The `in_flight` latch is
/// what makes triggering idempotent: starts while an operation runs are
/// dropped, and the runner becomes startable again once the operation
/// completes.
pub struct ActionRunner {
    action: Arc<dyn AdminAction>,
    instance: InstanceHandle,
    in_flight: AtomicBool,
    cell: Arc<Mutex<StatusCell>>,
    metrics: MetricsHandle,
}

impl ActionRunner {
    /// Create a runner bound to `instance`.
    pub fn new(
        action: Arc<dyn AdminAction>,
        instance: InstanceHandle,
        metrics: MetricsHandle,
    ) -> Self {
        Self {
            action,
            instance,
            in_flight: AtomicBool::new(false),
            cell: Arc::new(Mutex::new(StatusCell::default())),
            metrics,
        }
    }

    /// Action name of the bound operation.
    pub fn kind(&self) -> &'static str {
        self.action.kind()
    }

    /// Returns `true` while an operation is running.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Snapshot the runner state for a status page.
    pub fn status(&self) -> ActionStatus {
        let cell = self.cell.lock().unwrap_or_else(PoisonError::into_inner);
        ActionStatus {
            in_flight: self.is_in_flight(),
            message: cell.message.clone(),
            error: cell.error.clone(),
        }
    }

    /// Start one operation unless one is already in flight.
    ///
    /// Fire-and-forget: the operation runs on its own task and this call
    /// returns immediately. Outcome and duration are written into the
    /// status cell and the metrics backend when the operation completes.
    pub fn start(self: &Arc<Self>) -> StartOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return StartOutcome::AlreadyRunning;
        }

        // Fresh run: drop the previous outcome before anything is visible.
        {
            let mut cell = self.cell.lock().unwrap_or_else(PoisonError::into_inner);
            cell.message = None;
            cell.error = None;
        }

        let runner = Arc::clone(self);
        debug!(action = runner.kind(), "spawning admin operation");
        tokio::spawn(async move {
            let started = Instant::now();
            let progress = ActionProgress {
                cell: Arc::clone(&runner.cell),
            };
            let result = runner
                .action
                .run(Arc::clone(&runner.instance), progress)
                .await;
            let duration_ms = started.elapsed().as_millis() as u64;

            let outcome = match result {
                Ok(summary) => {
                    info!(
                        action = runner.kind(),
                        duration_ms, "admin operation finished"
                    );
                    let mut cell = runner.cell.lock().unwrap_or_else(PoisonError::into_inner);
                    cell.message = Some(summary);
                    ActionOutcome::Success
                }
                Err(err) => {
                    error!(
                        action = runner.kind(),
                        duration_ms,
                        error = %err,
                        "admin operation failed"
                    );
                    let mut cell = runner.cell.lock().unwrap_or_else(PoisonError::into_inner);
                    cell.error = Some(err.to_string());
                    ActionOutcome::Failure
                }
            };
            runner
                .metrics
                .record_action_completed(runner.kind(), outcome, duration_ms);

            // Latch clears last so a false reading implies a final status.
            runner.in_flight.store(false, Ordering::SeqCst);
        });

        StartOutcome::Started
    }
}
