//! Stub router instances and a fake reseed operation for the demo.

use std::{collections::HashMap, io, sync::Arc, time::Duration};

use async_trait::async_trait;

use orc_core::{ActionProgress, AdminAction, CoreError, InstanceHandle, RouterInstance};
use orc_model::{Ident, ModelError, PROP_GRAPH_WIDTH};

/// In-memory instance with canned subsystem summaries.
pub struct DemoInstance {
    ident: Ident,
    props: HashMap<String, String>,
    peers: &'static str,
    tunnels: &'static str,
}

impl RouterInstance for DemoInstance {
    fn ident(&self) -> &Ident {
        &self.ident
    }

    fn property(&self, key: &str) -> Option<String> {
        self.props.get(key).cloned()
    }

    fn render_peer_summary(&self, out: &mut dyn io::Write) -> io::Result<()> {
        writeln!(out, "{}", self.peers)
    }

    fn render_tunnel_summary(&self, out: &mut dyn io::Write) -> io::Result<()> {
        writeln!(out, "{}", self.tunnels)
    }

    fn render_keyring_summary(&self, out: &mut dyn io::Write) -> io::Result<()> {
        writeln!(out, "2 local destination keys, 0 revoked")
    }

    fn render_banlist_summary(&self, out: &mut dyn io::Write) -> io::Result<()> {
        writeln!(out, "1 peer banned until restart")
    }
}

/// Two stub instances in startup order, the second with a graph override.
pub fn demo_instances() -> Result<Vec<InstanceHandle>, ModelError> {
    let first = Arc::new(DemoInstance {
        ident: Ident::new("jT~wT4dk7mFlGt5WspMJ4dHv2eUWDTgGXaLBkcPW1sE=")?,
        props: HashMap::new(),
        peers: "147 known peers, 12 fast, 30 high capacity",
        tunnels: "6 exploratory + 14 client tunnels up",
    });

    let second = Arc::new(DemoInstance {
        ident: Ident::new("9fjzx0eDU28Cr2SnydjBBGEpE6qXhJKF6Gz6fhwbWJo=")?,
        props: HashMap::from([(PROP_GRAPH_WIDTH.to_string(), "400".to_string())]),
        peers: "31 known peers, 2 fast, 5 high capacity",
        tunnels: "4 exploratory + 2 client tunnels up",
    });

    Ok(vec![first, second])
}

/// Fake reseed that sleeps through the fetch phases.
pub struct DemoReseed;

#[async_trait]
impl AdminAction for DemoReseed {
    fn kind(&self) -> &'static str {
        "reseed"
    }

    async fn run(
        &self,
        instance: InstanceHandle,
        progress: ActionProgress,
    ) -> Result<String, CoreError> {
        progress.update(format!("contacting reseed hosts for {}", instance.ident()));
        tokio::time::sleep(Duration::from_secs(2)).await;

        progress.update("fetching router infos");
        tokio::time::sleep(Duration::from_secs(3)).await;

        progress.update("verifying signatures");
        tokio::time::sleep(Duration::from_secs(1)).await;

        Ok("reseed complete: 75 router infos imported".to_string())
    }
}
