mod config;
mod stub;

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::{error, info};

use orc_api::{ConsoleCore, HttpConsole};
use orc_core::{ActionGate, InstanceDirectory, MetricsHandle, StaticDirectory};
use orc_model::{parse_menu_table, sort_menu};
use orc_observe::init_logging;
use orc_prometheus::{Encoder, PrometheusMetrics, TextEncoder};

use config::ConsoleConfig;
use stub::{DemoReseed, demo_instances};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // 1) config
    let cfg = ConsoleConfig::load_or_default(std::env::args().nth(1).as_deref())?;

    // 2) logging
    init_logging(&cfg.log)?;
    info!("logging initialized");

    // 3) metrics backend
    let prometheus = PrometheusMetrics::new()?;
    let metrics: MetricsHandle = Arc::new(prometheus.clone());

    // 4) stub instances
    let directory = Arc::new(StaticDirectory::new(demo_instances()?));
    info!(instances = directory.list().len(), "demo instances registered");

    // 5) reseed gate
    let gate = Arc::new(ActionGate::new(Arc::new(DemoReseed)).with_metrics(Arc::clone(&metrics)));
    info!(action = gate.kind(), "action gate ready");

    // 6) console assembly
    let mut console = ConsoleCore::new(directory, gate).with_metrics(metrics);
    if let Some(table) = &cfg.menu {
        let mut entries = parse_menu_table(table);
        sort_menu(&mut entries);
        info!(entries = entries.len(), "using configured menu table");
        console = console.with_menu(entries);
    }

    // 7) router + /metrics + serve
    let app = HttpConsole::new(Arc::new(console)).router().merge(
        Router::new()
            .route("/metrics", get(metrics_handler))
            .with_state(Arc::new(prometheus)),
    );

    let listener = tokio::net::TcpListener::bind(&cfg.listen).await?;
    info!(addr = %listener.local_addr()?, "console listening");
    axum::serve(listener, app).await?;

    Ok(())
}

/// GET /metrics
async fn metrics_handler(State(metrics): State<Arc<PrometheusMetrics>>) -> Response {
    let families = metrics.gather();
    let encoder = TextEncoder::new();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&families, &mut buffer) {
        error!(error = %e, "metrics encoding failed");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    (
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    )
        .into_response()
}
