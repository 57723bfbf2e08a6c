use std::sync::Arc;

use prometheus::{CounterVec, HistogramOpts, HistogramVec, Opts, Registry, proto::MetricFamily};

use orc_core::{ActionOutcome, ConsoleMetrics};

/// Histogram buckets for admin operation runtime, in seconds.
///
/// Reseed-class operations span everything from a sub-second no-op to
/// many minutes against slow mirrors, so the scale stretches to 15m.
const DURATION_BUCKETS: &[f64] = &[0.5, 1.0, 5.0, 15.0, 60.0, 300.0, 900.0];

/// [`ConsoleMetrics`] backend exporting to a prometheus [`Registry`].
///
/// Every family lives under the `orc` namespace. Label sets stay small:
/// `action` is one value per registered action kind, `outcome` is the
/// fixed trigger and completion vocabulary, `section` is the fixed set
/// of page section titles.
#[derive(Clone)]
pub struct PrometheusMetrics {
    triggers: CounterVec,
    actions_completed: CounterVec,
    action_duration: HistogramVec,
    render_failures: CounterVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Build the console families and register them in `registry`.
    ///
    /// Use this form to share one registry between the console and other
    /// subsystems of the embedding binary.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let triggers = counter(
            &registry,
            "console_triggers_total",
            "Processed trigger submissions",
            &["action", "outcome"],
        )?;

        let actions_completed = counter(
            &registry,
            "console_actions_completed_total",
            "Finished background admin operations",
            &["action", "outcome"],
        )?;

        let action_duration = HistogramVec::new(
            HistogramOpts::new(
                "console_action_duration_seconds",
                "Background admin operation runtime in seconds",
            )
            .namespace("orc")
            .buckets(DURATION_BUCKETS.to_vec()),
            &["action"],
        )?;
        registry.register(Box::new(action_duration.clone()))?;

        let render_failures = counter(
            &registry,
            "console_render_failures_total",
            "Page sections that degraded to empty",
            &["section"],
        )?;

        Ok(Self {
            triggers,
            actions_completed,
            action_duration,
            render_failures,
            registry,
        })
    }

    /// Build with a registry of its own.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    /// Snapshot every family for exposition on `/metrics`.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// The backing registry, for registering extra families next to the
    /// console's.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

fn counter(
    registry: &Registry,
    name: &str,
    help: &str,
    labels: &[&str],
) -> Result<CounterVec, prometheus::Error> {
    let vec = CounterVec::new(Opts::new(name, help).namespace("orc"), labels)?;
    registry.register(Box::new(vec.clone()))?;
    Ok(vec)
}

impl ConsoleMetrics for PrometheusMetrics {
    fn record_trigger(&self, action: &str, outcome: &str) {
        self.triggers.with_label_values(&[action, outcome]).inc();
    }

    fn record_action_completed(&self, action: &str, outcome: ActionOutcome, duration_ms: u64) {
        self.actions_completed
            .with_label_values(&[action, outcome.as_label()])
            .inc();
        self.action_duration
            .with_label_values(&[action])
            .observe(duration_ms as f64 / 1000.0);
    }

    fn record_render_failure(&self, section: &str) {
        self.render_failures.with_label_values(&[section]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family<'a>(families: &'a [MetricFamily], name: &str) -> &'a MetricFamily {
        families
            .iter()
            .find(|f| f.name() == name)
            .unwrap_or_else(|| panic!("family {name} not exported"))
    }

    #[test]
    fn every_family_lands_under_the_orc_namespace() {
        let metrics = PrometheusMetrics::new().unwrap();
        metrics.record_trigger("reseed", "started");
        metrics.record_action_completed("reseed", ActionOutcome::Success, 10);
        metrics.record_render_failure("Peers");

        let families = metrics.gather();
        for name in [
            "orc_console_triggers_total",
            "orc_console_actions_completed_total",
            "orc_console_action_duration_seconds",
            "orc_console_render_failures_total",
        ] {
            family(&families, name);
        }
    }

    #[test]
    fn trigger_outcomes_count_separately() {
        let metrics = PrometheusMetrics::new().unwrap();
        metrics.record_trigger("reseed", "started");
        metrics.record_trigger("reseed", "already-running");
        metrics.record_trigger("reseed", "already-running");

        let families = metrics.gather();
        let triggers = family(&families, "orc_console_triggers_total");
        // two label combinations: started, already-running
        assert_eq!(triggers.get_metric().len(), 2);
    }

    #[test]
    fn completion_feeds_counter_and_histogram() {
        let metrics = PrometheusMetrics::new().unwrap();
        metrics.record_action_completed("reseed", ActionOutcome::Success, 4200);
        metrics.record_action_completed("reseed", ActionOutcome::Failure, 150);

        let families = metrics.gather();
        let completed = family(&families, "orc_console_actions_completed_total");
        assert_eq!(completed.get_metric().len(), 2);

        let duration = family(&families, "orc_console_action_duration_seconds");
        assert_eq!(duration.get_metric().len(), 1);
    }

    #[test]
    fn render_failures_count_per_section() {
        let metrics = PrometheusMetrics::new().unwrap();
        metrics.record_render_failure("Peers");
        metrics.record_render_failure("Peers");
        metrics.record_render_failure("Tunnels");

        let families = metrics.gather();
        let failures = family(&families, "orc_console_render_failures_total");
        assert_eq!(failures.get_metric().len(), 2);
    }

    #[test]
    fn shared_registry_receives_the_families() {
        let registry = Arc::new(Registry::new());
        let metrics = PrometheusMetrics::new_with_registry(Arc::clone(&registry)).unwrap();

        metrics.record_trigger("reseed", "started");
        assert!(!registry.gather().is_empty());
    }
}
