use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    response::{Html, IntoResponse},
    routing::{get, post},
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::info;

use orc_core::CoreError;

use crate::{
    error::ApiError,
    handler::{ConsoleHandler, HomeView, SummaryView},
};

/// HTTP console service builder.
pub struct HttpConsole<H> {
    handler: Arc<H>,
}

impl<H> HttpConsole<H>
where
    H: ConsoleHandler,
{
    /// Create new HTTP console with the given handler.
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - GET / - Home page with the application menu
    /// - GET /summary - Instance status page (?instance= selects by ident prefix)
    /// - POST /summary - Trigger form target, re-renders the status page
    /// - GET /graphs - Clamped graph dimensions as JSON
    pub fn router(self) -> Router {
        Router::new()
            .route("/", get(home::<H>))
            .route("/summary", get(summary::<H>))
            .route("/summary", post(trigger::<H>))
            .route("/graphs", get(graphs::<H>))
            .with_state(self.handler)
    }
}

/// Bind `addr` and serve the console until the server is shut down.
pub async fn serve<H>(addr: &str, handler: Arc<H>) -> Result<(), ApiError>
where
    H: ConsoleHandler,
{
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "console listening");

    axum::serve(listener, HttpConsole::new(handler).router()).await?;
    Ok(())
}

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Deserialize)]
struct SelectQuery {
    /// Instance ident prefix; absent or blank selects the first instance
    instance: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphQuery {
    /// Instance ident prefix
    instance: Option<String>,
    /// Requested graph width in pixels
    width: Option<i64>,
    /// Requested graph height in pixels
    height: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct TriggerForm {
    /// Instance ident prefix the submitting page was rendered for
    instance: Option<String>,
    /// Trigger token embedded in the rendered form
    token: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
async fn home<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: ConsoleHandler,
{
    let view = handler.home().await?;

    Ok(Html(render_home(&view)))
}

/// GET /summary
async fn summary<H>(
    State(handler): State<Arc<H>>,
    Query(query): Query<SelectQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ConsoleHandler,
{
    summary_page(handler.as_ref(), query.instance.as_deref()).await
}

/// POST /summary
///
/// Always answers with the re-rendered summary page: the response does not
/// distinguish a started operation from a rejected or dropped one.
async fn trigger<H>(
    State(handler): State<Arc<H>>,
    Form(form): Form<TriggerForm>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ConsoleHandler,
{
    handler
        .trigger(form.instance.as_deref(), form.token.as_deref())
        .await?;

    summary_page(handler.as_ref(), form.instance.as_deref()).await
}

/// GET /graphs
async fn graphs<H>(
    State(handler): State<Arc<H>>,
    Query(query): Query<GraphQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ConsoleHandler,
{
    let view = handler
        .graph_dimensions(query.instance.as_deref(), query.width, query.height)
        .await?;

    Ok(Json(view))
}

/// Render the summary page, degrading to the "no instances" notice when the
/// registry is empty. The notice is still HTTP 200: the condition is
/// transient and pages are expected to be reloaded.
async fn summary_page<H>(handler: &H, instance: Option<&str>) -> Result<Html<String>, ApiError>
where
    H: ConsoleHandler,
{
    match handler.summary(instance).await {
        Ok(view) => Ok(Html(render_summary(&view))),
        Err(ApiError::Core(CoreError::NoInstances)) => Ok(Html(render_unavailable())),
        Err(e) => Err(e),
    }
}

// ============================================================================
// Page rendering
// ============================================================================

fn render_home(view: &HomeView) -> String {
    let mut page = String::new();
    page.push_str("<!DOCTYPE html><html><head><title>Router Console</title></head><body>");
    page.push_str("<h1>Router Console</h1>");
    page.push_str(&format!(
        "<p>{} instance(s) running. <a href=\"/summary\">Summary</a></p>",
        view.instance_count
    ));

    page.push_str("<ul>");
    for entry in &view.menu {
        page.push_str(&format!(
            "<li><a href=\"{url}\" title=\"{desc}\"><img src=\"{icon}\" alt=\"\"> {name}</a></li>",
            url = html_escape(entry.url()),
            desc = html_escape(entry.description()),
            icon = html_escape(entry.icon()),
            name = html_escape(entry.name()),
        ));
    }
    page.push_str("</ul>");

    page.push_str("</body></html>");
    page
}

fn render_summary(view: &SummaryView) -> String {
    let mut page = String::new();
    page.push_str("<!DOCTYPE html><html><head><title>Summary</title></head><body>");
    page.push_str(&format!("<h1>Instance {}</h1>", html_escape(&view.ident)));

    page.push_str("<p>Instances: ");
    for ident in &view.instances {
        page.push_str(&format!(
            "<a href=\"/summary?instance={id}\">{id}</a> ",
            id = html_escape(ident)
        ));
    }
    page.push_str("</p>");

    if view.in_flight {
        page.push_str(&format!(
            "<p>{} in progress...</p>",
            html_escape(&view.action_kind)
        ));
    }
    if let Some(message) = &view.status_message {
        page.push_str(&format!("<p>{}</p>", html_escape(message)));
    }
    if let Some(error) = &view.status_error {
        page.push_str(&format!("<p>Error: {}</p>", html_escape(error)));
    }

    if let Some(token) = &view.form_token {
        page.push_str(&format!(
            concat!(
                "<form method=\"post\" action=\"/summary\">",
                "<input type=\"hidden\" name=\"token\" value=\"{token}\">",
                "<input type=\"hidden\" name=\"instance\" value=\"{instance}\">",
                "<button type=\"submit\">Start {action}</button>",
                "</form>"
            ),
            token = html_escape(token),
            instance = html_escape(&view.ident),
            action = html_escape(&view.action_kind),
        ));
    }

    for section in &view.sections {
        page.push_str(&format!(
            "<h2>{}</h2><pre>{}</pre>",
            html_escape(&section.title),
            html_escape(&section.body)
        ));
    }

    page.push_str("</body></html>");
    page
}

fn render_unavailable() -> String {
    concat!(
        "<!DOCTYPE html><html><head><title>Summary</title></head><body>",
        "<h1>Router Console</h1>",
        "<p>No router instances are available: the process is starting up ",
        "or shutting down. Retry in a moment.</p>",
        "</body></html>"
    )
    .to_string()
}

/// Minimal HTML escaping for text and attribute positions.
fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
