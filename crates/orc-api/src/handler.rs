use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use orc_model::MenuEntry;

use crate::error::ApiError;

/// Data behind the home page: navigation menu plus a liveness hint.
#[derive(Debug, Clone)]
pub struct HomeView {
    /// Menu entries in display order.
    pub menu: Vec<MenuEntry>,
    /// Number of live instances at assembly time.
    pub instance_count: usize,
}

/// One best-effort subsystem section of the summary page.
///
/// A failed render leaves `body` empty; the page never fails over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarySection {
    pub title: String,
    pub body: String,
}

/// Data behind the per-instance summary page.
#[derive(Debug, Clone)]
pub struct SummaryView {
    /// Identity of the resolved instance.
    pub ident: String,
    /// Identities of all live instances, in startup order.
    pub instances: Vec<String>,
    /// Action kind offered by the trigger form.
    pub action_kind: String,
    /// An admin operation is currently running.
    pub in_flight: bool,
    /// Latest progress line or completion summary.
    pub status_message: Option<String>,
    /// Failure text of the last completed operation.
    pub status_error: Option<String>,
    /// Freshly minted form token; `None` while an operation is in flight.
    pub form_token: Option<String>,
    /// Best-effort subsystem sections, in page order.
    pub sections: Vec<SummarySection>,
}

/// Clamped graph dimensions for one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphView {
    pub ident: String,
    pub width: u32,
    pub height: u32,
}

/// Console page handler.
///
/// This trait abstracts the page assembly, allowing users to:
/// - Use the provided `ConsoleCore`
/// - Implement custom handlers with additional logic (auth, rate limiting, etc.)
#[async_trait]
pub trait ConsoleHandler: Send + Sync + 'static {
    /// Assemble the home page.
    async fn home(&self) -> Result<HomeView, ApiError>;

    /// Assemble the summary page for the instance selected by `instance`.
    ///
    /// A missing or blank selector picks the first instance; an unmatched
    /// prefix falls back to it.
    async fn summary(&self, instance: Option<&str>) -> Result<SummaryView, ApiError>;

    /// Process one trigger form submission.
    ///
    /// Never fails on bad input: stale tokens and empty registries are
    /// absorbed below this boundary.
    async fn trigger(&self, instance: Option<&str>, token: Option<&str>) -> Result<(), ApiError>;

    /// Clamp requested graph dimensions against the limits table and the
    /// selected instance's property overrides.
    async fn graph_dimensions(
        &self,
        instance: Option<&str>,
        width: Option<i64>,
        height: Option<i64>,
    ) -> Result<GraphView, ApiError>;
}
