//! Seam between the console and the hosting router process.
//!
//! The hosting process owns instance lifecycles and all router subsystems.
//! The console sees each instance through [`RouterInstance`]: a stable
//! identity, read-only properties and a handful of status renderings
//! streamed into a caller-supplied sink.
use std::{io, sync::Arc};

use orc_model::Ident;

/// One logical router hosted inside the process.
///
/// Implementations live on the hosting side. All methods are read-only;
/// the console never creates, mutates or destroys instances through this
/// trait.
pub trait RouterInstance: Send + Sync + 'static {
    /// Stable encoded identity hash of this instance.
    fn ident(&self) -> &Ident;

    /// Look up a per-instance configuration property.
    fn property(&self, key: &str) -> Option<String>;

    /// Stream a short peer-profile summary into `out`.
    fn render_peer_summary(&self, out: &mut dyn io::Write) -> io::Result<()>;

    /// Stream a tunnel status summary into `out`.
    fn render_tunnel_summary(&self, out: &mut dyn io::Write) -> io::Result<()>;

    /// Stream a key-ring summary into `out`.
    fn render_keyring_summary(&self, out: &mut dyn io::Write) -> io::Result<()>;

    /// Stream a ban-list summary into `out`.
    fn render_banlist_summary(&self, out: &mut dyn io::Write) -> io::Result<()>;
}

/// Shared handle to a router instance.
///
/// Held only transiently by the console, for the duration of one request
/// or one background operation.
pub type InstanceHandle = Arc<dyn RouterInstance>;

/// Source of the live instance registry.
///
/// Listing is recomputed per request; the registry can change between
/// calls as instances start and stop.
pub trait InstanceDirectory: Send + Sync + 'static {
    /// All live instances in startup order.
    ///
    /// May legitimately return an empty list while the process is starting
    /// up or shutting down.
    fn list(&self) -> Vec<InstanceHandle>;
}

/// Directory over a fixed, pre-built list of instances.
///
/// Suits processes whose instances are all created at startup.
#[derive(Default)]
pub struct StaticDirectory {
    instances: Vec<InstanceHandle>,
}

impl StaticDirectory {
    /// Create a directory serving the given handles in the given order.
    pub fn new(instances: Vec<InstanceHandle>) -> Self {
        Self { instances }
    }
}

impl InstanceDirectory for StaticDirectory {
    fn list(&self) -> Vec<InstanceHandle> {
        self.instances.clone()
    }
}
