use std::{io, sync::Arc};

use async_trait::async_trait;
use tracing::warn;

use orc_core::{
    ActionGate, InstanceDirectory, InstanceHandle, MetricsHandle, RouterInstance, noop_metrics,
    resolve,
};
use orc_model::{
    MenuEntry, PROP_GRAPH_HEIGHT, PROP_GRAPH_WIDTH, clamp_height, clamp_width, default_menu,
};

use crate::error::ApiError;
use crate::handler::{ConsoleHandler, GraphView, HomeView, SummarySection, SummaryView};

type SectionRender = fn(&dyn RouterInstance, &mut dyn io::Write) -> io::Result<()>;

fn render_peers(i: &dyn RouterInstance, out: &mut dyn io::Write) -> io::Result<()> {
    i.render_peer_summary(out)
}

fn render_tunnels(i: &dyn RouterInstance, out: &mut dyn io::Write) -> io::Result<()> {
    i.render_tunnel_summary(out)
}

fn render_keyring(i: &dyn RouterInstance, out: &mut dyn io::Write) -> io::Result<()> {
    i.render_keyring_summary(out)
}

fn render_banlist(i: &dyn RouterInstance, out: &mut dyn io::Write) -> io::Result<()> {
    i.render_banlist_summary(out)
}

/// Subsystem sections of the summary page, in page order.
const SECTIONS: [(&str, SectionRender); 4] = [
    ("Peers", render_peers),
    ("Tunnels", render_tunnels),
    ("Key ring", render_keyring),
    ("Ban list", render_banlist),
];

/// Ready-to-use [`ConsoleHandler`] over a directory and an action gate.
///
/// This is the assembly point of the console: it resolves the target
/// instance, reads gate state, mints form tokens and collects the
/// best-effort subsystem sections.
pub struct ConsoleCore {
    directory: Arc<dyn InstanceDirectory>,
    gate: Arc<ActionGate>,
    menu: Vec<MenuEntry>,
    metrics: MetricsHandle,
}

impl ConsoleCore {
    /// Create a console over `directory` and `gate` with the built-in menu
    /// and no-op metrics.
    pub fn new(directory: Arc<dyn InstanceDirectory>, gate: Arc<ActionGate>) -> Self {
        Self {
            directory,
            gate,
            menu: default_menu(),
            metrics: noop_metrics(),
        }
    }

    /// Replace the navigation menu and return the updated console.
    pub fn with_menu(mut self, menu: Vec<MenuEntry>) -> Self {
        self.menu = menu;
        self
    }

    /// Replace the metrics backend and return the updated console.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    /// Collect all subsystem sections for `instance`.
    ///
    /// A failing render is logged and counted, and yields an empty body;
    /// the remaining sections still render.
    fn render_sections(&self, instance: &InstanceHandle) -> Vec<SummarySection> {
        SECTIONS
            .into_iter()
            .map(|(title, render)| {
                let mut sink = Vec::new();
                let body = match render(instance.as_ref(), &mut sink) {
                    Ok(()) => String::from_utf8_lossy(&sink).into_owned(),
                    Err(e) => {
                        warn!(
                            section = title,
                            instance = %instance.ident(),
                            error = %e,
                            "section render failed, leaving it empty"
                        );
                        self.metrics.record_render_failure(title);
                        String::new()
                    }
                };
                SummarySection {
                    title: title.to_string(),
                    body,
                }
            })
            .collect()
    }
}

#[async_trait]
impl ConsoleHandler for ConsoleCore {
    async fn home(&self) -> Result<HomeView, ApiError> {
        Ok(HomeView {
            menu: self.menu.clone(),
            instance_count: self.directory.list().len(),
        })
    }

    async fn summary(&self, instance: Option<&str>) -> Result<SummaryView, ApiError> {
        let registry = self.directory.list();
        let target = resolve(&registry, instance)?;

        let status = self.gate.status().unwrap_or_default();
        let form_token = self.gate.mint_token();
        let sections = self.render_sections(&target);

        Ok(SummaryView {
            ident: target.ident().to_string(),
            instances: registry.iter().map(|h| h.ident().to_string()).collect(),
            action_kind: self.gate.kind().to_string(),
            in_flight: status.in_flight,
            status_message: status.message,
            status_error: status.error,
            form_token,
            sections,
        })
    }

    async fn trigger(&self, instance: Option<&str>, token: Option<&str>) -> Result<(), ApiError> {
        // Outcome is logged and counted inside the gate; the wire stays uniform.
        self.gate.trigger(self.directory.as_ref(), instance, token);
        Ok(())
    }

    async fn graph_dimensions(
        &self,
        instance: Option<&str>,
        width: Option<i64>,
        height: Option<i64>,
    ) -> Result<GraphView, ApiError> {
        let registry = self.directory.list();
        let target = resolve(&registry, instance)?;

        let width_override = property_i64(target.as_ref(), PROP_GRAPH_WIDTH);
        let height_override = property_i64(target.as_ref(), PROP_GRAPH_HEIGHT);

        Ok(GraphView {
            ident: target.ident().to_string(),
            width: clamp_width(width.or(width_override)),
            height: clamp_height(height.or(height_override)),
        })
    }
}

fn property_i64(instance: &dyn RouterInstance, key: &str) -> Option<i64> {
    instance.property(key).and_then(|v| v.trim().parse().ok())
}
