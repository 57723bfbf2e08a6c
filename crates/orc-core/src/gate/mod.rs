//! Singleton-guarded dispatch of administrative actions.
//!
//! One [`ActionGate`] guards one action kind for the whole process. It
//! validates trigger tokens, lazily binds the [`ActionRunner`] singleton
//! on the first accepted trigger and forwards start signals to it. Every
//! failure is absorbed here: the caller always gets an outcome, never an
//! error.
mod runner;
pub use runner::{ActionProgress, ActionRunner, ActionStatus, AdminAction, StartOutcome};

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use crate::{
    instance::InstanceDirectory,
    metrics::{MetricsHandle, noop_metrics},
    select::resolve,
    token::TokenRotor,
};

/// Outcome of one trigger request, for logs and metrics only.
///
/// The wire deliberately renders every variant as the same successful
/// page, so a stale or forged submission learns nothing. Anything worth
/// telling apart ends up here instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Token accepted, a new operation was spawned.
    Started,
    /// Token accepted, an operation was already in flight.
    AlreadyRunning,
    /// Token missing or outside the two-slot validity window.
    RejectedToken,
    /// Registry was empty at resolution time.
    NoInstances,
}

impl TriggerOutcome {
    /// Label value for logs and metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            TriggerOutcome::Started => "started",
            TriggerOutcome::AlreadyRunning => "already-running",
            TriggerOutcome::RejectedToken => "rejected-token",
            TriggerOutcome::NoInstances => "no-instances",
        }
    }
}

/// Process-wide guard for one kind of administrative action.
///
/// Owns the trigger-token rotor and the lazily-bound [`ActionRunner`]
/// singleton. The slot lock guards creation only: once a runner exists,
/// its own latch guards against concurrent operations.
///
/// Construct one gate per action kind at startup and share it. The gate
/// is the explicit owner of what would otherwise be hidden global state.
pub struct ActionGate {
    action: Arc<dyn AdminAction>,
    rotor: TokenRotor,
    runner: Mutex<Option<Arc<ActionRunner>>>,
    metrics: MetricsHandle,
}

impl ActionGate {
    /// Create a gate for `action` with no-op metrics.
    pub fn new(action: Arc<dyn AdminAction>) -> Self {
        Self {
            action,
            rotor: TokenRotor::new(),
            runner: Mutex::new(None),
            metrics: noop_metrics(),
        }
    }

    /// Replace the metrics backend and return the updated gate.
    ///
    /// Set before the first trigger; the bound runner captures the handle.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    /// Action name guarded by this gate.
    pub fn kind(&self) -> &'static str {
        self.action.kind()
    }

    /// Mint a fresh token for an about-to-be-rendered trigger form.
    ///
    /// Returns `None` while an operation is in flight: the form is
    /// replaced by a status line then, and rotation pauses with it, so a
    /// page held open across a whole operation keeps a valid token.
    pub fn mint_token(&self) -> Option<String> {
        if self.is_in_flight() {
            return None;
        }
        Some(self.rotor.mint())
    }

    /// Returns `true` while the bound runner has an operation in flight.
    pub fn is_in_flight(&self) -> bool {
        self.slot().map(|r| r.is_in_flight()).unwrap_or(false)
    }

    /// Status of the bound runner, or `None` before the first accepted
    /// trigger.
    pub fn status(&self) -> Option<ActionStatus> {
        self.slot().map(|r| r.status())
    }

    /// Process one trigger request.
    ///
    /// This call never fails and never blocks on the triggered work: every
    /// internal failure is logged here, counted, and collapsed into the
    /// returned outcome. Callers render the same successful page whatever
    /// the outcome says.
    pub fn trigger(
        &self,
        directory: &dyn InstanceDirectory,
        instance_prefix: Option<&str>,
        token: Option<&str>,
    ) -> TriggerOutcome {
        let outcome = self.try_trigger(directory, instance_prefix, token);
        self.metrics.record_trigger(self.kind(), outcome.as_label());

        match outcome {
            TriggerOutcome::Started => {
                info!(action = self.kind(), "admin action started");
            }
            TriggerOutcome::AlreadyRunning => {
                debug!(
                    action = self.kind(),
                    "trigger ignored: operation already in flight"
                );
            }
            TriggerOutcome::RejectedToken => {
                warn!(
                    action = self.kind(),
                    "trigger rejected: token outside validity window"
                );
            }
            TriggerOutcome::NoInstances => {
                warn!(
                    action = self.kind(),
                    "trigger ignored: no instances available"
                );
            }
        }
        outcome
    }

    fn try_trigger(
        &self,
        directory: &dyn InstanceDirectory,
        instance_prefix: Option<&str>,
        token: Option<&str>,
    ) -> TriggerOutcome {
        if !self.rotor.accepts(token) {
            return TriggerOutcome::RejectedToken;
        }

        let registry = directory.list();
        let Ok(instance) = resolve(&registry, instance_prefix) else {
            return TriggerOutcome::NoInstances;
        };

        // Bind-once: the first accepted trigger fixes the target instance
        // for the life of the process.
        let runner = {
            let mut slot = self.runner.lock().unwrap_or_else(PoisonError::into_inner);
            match slot.as_ref() {
                Some(existing) => Arc::clone(existing),
                None => {
                    info!(
                        action = self.kind(),
                        instance = %instance.ident(),
                        "binding action runner"
                    );
                    let created = Arc::new(ActionRunner::new(
                        Arc::clone(&self.action),
                        instance,
                        Arc::clone(&self.metrics),
                    ));
                    *slot = Some(Arc::clone(&created));
                    created
                }
            }
        };

        match runner.start() {
            StartOutcome::Started => TriggerOutcome::Started,
            StartOutcome::AlreadyRunning => TriggerOutcome::AlreadyRunning,
        }
    }

    fn slot(&self) -> Option<Arc<ActionRunner>> {
        self.runner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(Arc::clone)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use orc_model::Ident;

    use super::{ActionGate, ActionProgress, AdminAction, TriggerOutcome};
    use crate::error::CoreError;
    use crate::instance::{InstanceHandle, RouterInstance, StaticDirectory};

    struct StubInstance {
        ident: Ident,
    }

    impl RouterInstance for StubInstance {
        fn ident(&self) -> &Ident {
            &self.ident
        }

        fn property(&self, _key: &str) -> Option<String> {
            None
        }

        fn render_peer_summary(&self, _out: &mut dyn io::Write) -> io::Result<()> {
            Ok(())
        }

        fn render_tunnel_summary(&self, _out: &mut dyn io::Write) -> io::Result<()> {
            Ok(())
        }

        fn render_keyring_summary(&self, _out: &mut dyn io::Write) -> io::Result<()> {
            Ok(())
        }

        fn render_banlist_summary(&self, _out: &mut dyn io::Write) -> io::Result<()> {
            Ok(())
        }
    }

    fn handle(ident: &str) -> InstanceHandle {
        Arc::new(StubInstance {
            ident: Ident::new(ident).unwrap(),
        })
    }

    fn two_instances() -> StaticDirectory {
        StaticDirectory::new(vec![handle("abc123xyz"), handle("def456uvw")])
    }

    /// Action that blocks until released, recording runs and instances.
    struct RecordingAction {
        release: Notify,
        runs: AtomicUsize,
        seen: Mutex<Vec<String>>,
    }

    impl RecordingAction {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                release: Notify::new(),
                runs: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl AdminAction for RecordingAction {
        fn kind(&self) -> &'static str {
            "reseed"
        }

        async fn run(
            &self,
            instance: InstanceHandle,
            _progress: ActionProgress,
        ) -> Result<String, CoreError> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(instance.ident().to_string());
            self.release.notified().await;
            Ok("reseed complete".to_string())
        }
    }

    async fn wait_until(cond: impl Fn() -> bool) {
        for _ in 0..400 {
            if cond() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("condition was not reached in time");
    }

    #[tokio::test]
    async fn minted_token_triggers_the_action() {
        let action = RecordingAction::new();
        let gate = ActionGate::new(action.clone());
        let dir = two_instances();

        let token = gate.mint_token().expect("idle gate must mint");
        let outcome = gate.trigger(&dir, None, Some(&token));

        assert_eq!(outcome, TriggerOutcome::Started);
        assert!(gate.is_in_flight());
        assert!(gate.status().is_some());

        action.release.notify_one();
        wait_until(|| !gate.is_in_flight()).await;
        assert_eq!(action.runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn previous_token_still_validates_after_one_rotation() {
        let action = RecordingAction::new();
        let gate = ActionGate::new(action.clone());
        let dir = two_instances();

        let stale = gate.mint_token().unwrap();
        let _fresh = gate.mint_token().unwrap();

        let outcome = gate.trigger(&dir, None, Some(&stale));
        assert_eq!(outcome, TriggerOutcome::Started);

        action.release.notify_one();
        wait_until(|| !gate.is_in_flight()).await;
    }

    #[tokio::test]
    async fn expired_token_is_silently_rejected() {
        let action = RecordingAction::new();
        let gate = ActionGate::new(action.clone());
        let dir = two_instances();

        let expired = gate.mint_token().unwrap();
        let _t2 = gate.mint_token().unwrap();
        let _t3 = gate.mint_token().unwrap();

        let outcome = gate.trigger(&dir, None, Some(&expired));

        assert_eq!(outcome, TriggerOutcome::RejectedToken);
        assert_eq!(action.runs.load(Ordering::SeqCst), 0);
        // nothing was bound: a rejected token leaves the gate untouched
        assert!(gate.status().is_none());
    }

    #[tokio::test]
    async fn missing_and_forged_tokens_are_rejected() {
        let action = RecordingAction::new();
        let gate = ActionGate::new(action.clone());
        let dir = two_instances();

        let _valid = gate.mint_token().unwrap();

        assert_eq!(gate.trigger(&dir, None, None), TriggerOutcome::RejectedToken);
        assert_eq!(
            gate.trigger(&dir, None, Some("tok2")),
            TriggerOutcome::RejectedToken
        );
        assert_eq!(action.runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_registry_drops_the_trigger() {
        let action = RecordingAction::new();
        let gate = ActionGate::new(action.clone());
        let dir = StaticDirectory::default();

        let token = gate.mint_token().unwrap();
        let outcome = gate.trigger(&dir, Some("xyz"), Some(&token));

        assert_eq!(outcome, TriggerOutcome::NoInstances);
        assert!(gate.status().is_none());
        assert_eq!(action.runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn trigger_while_in_flight_is_idempotent() {
        let action = RecordingAction::new();
        let gate = ActionGate::new(action.clone());
        let dir = two_instances();

        let token = gate.mint_token().unwrap();
        assert_eq!(gate.trigger(&dir, None, Some(&token)), TriggerOutcome::Started);

        // same token again: still inside the window, but the operation runs
        assert_eq!(
            gate.trigger(&dir, None, Some(&token)),
            TriggerOutcome::AlreadyRunning
        );
        assert_eq!(action.runs.load(Ordering::SeqCst), 1);

        action.release.notify_one();
        wait_until(|| !gate.is_in_flight()).await;
    }

    #[tokio::test]
    async fn minting_pauses_while_an_operation_runs() {
        let action = RecordingAction::new();
        let gate = ActionGate::new(action.clone());
        let dir = two_instances();

        let token = gate.mint_token().unwrap();
        gate.trigger(&dir, None, Some(&token));
        assert!(gate.mint_token().is_none());

        action.release.notify_one();
        wait_until(|| !gate.is_in_flight()).await;
        assert!(gate.mint_token().is_some());
    }

    #[tokio::test]
    async fn completed_runner_restarts_on_the_next_trigger() {
        let action = RecordingAction::new();
        let gate = ActionGate::new(action.clone());
        let dir = two_instances();

        let token = gate.mint_token().unwrap();
        gate.trigger(&dir, None, Some(&token));
        action.release.notify_one();
        wait_until(|| !gate.is_in_flight()).await;

        let token = gate.mint_token().unwrap();
        assert_eq!(gate.trigger(&dir, None, Some(&token)), TriggerOutcome::Started);
        action.release.notify_one();
        wait_until(|| !gate.is_in_flight()).await;

        assert_eq!(action.runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn runner_stays_bound_to_the_first_resolved_instance() {
        let action = RecordingAction::new();
        let gate = ActionGate::new(action.clone());
        let dir = two_instances();

        let token = gate.mint_token().unwrap();
        gate.trigger(&dir, Some("def"), Some(&token));
        action.release.notify_one();
        wait_until(|| !gate.is_in_flight()).await;

        // a later trigger naming the other instance reuses the bound runner
        let token = gate.mint_token().unwrap();
        gate.trigger(&dir, Some("abc"), Some(&token));
        action.release.notify_one();
        wait_until(|| !gate.is_in_flight()).await;

        let seen = action.seen.lock().unwrap().clone();
        assert_eq!(seen, ["def456uvw", "def456uvw"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_triggers_start_exactly_one_operation() {
        let action = RecordingAction::new();
        let gate = Arc::new(ActionGate::new(action.clone()));
        let dir = Arc::new(two_instances());

        let token = gate.mint_token().unwrap();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let gate = Arc::clone(&gate);
            let dir = Arc::clone(&dir);
            let token = token.clone();
            handles.push(tokio::spawn(async move {
                gate.trigger(dir.as_ref(), None, Some(&token))
            }));
        }

        let mut started = 0;
        let mut already_running = 0;
        for h in handles {
            match h.await.unwrap() {
                TriggerOutcome::Started => started += 1,
                TriggerOutcome::AlreadyRunning => already_running += 1,
                other => panic!("unexpected outcome under contention: {other:?}"),
            }
        }

        assert_eq!(started, 1);
        assert_eq!(already_running, 15);
        assert_eq!(action.runs.load(Ordering::SeqCst), 1);

        action.release.notify_one();
        wait_until(|| !gate.is_in_flight()).await;
    }
}
