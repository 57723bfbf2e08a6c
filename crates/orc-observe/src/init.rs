use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

use crate::{config::LogConfig, error::LogError, format::LogFormat};

/// Install the process-wide tracing subscriber described by `config`.
///
/// Call once at startup, before anything logs. A second call fails with
/// [`LogError::AlreadyInitialized`]. The stdout formats stamp every
/// record with RFC3339 UTC wall-clock time; journald records carry the
/// journal's own timestamps.
///
/// ```rust,ignore
/// let config = LogConfig::default();
/// init_logging(&config)?;
/// tracing::info!("console starting");
/// ```
pub fn init_logging(config: &LogConfig) -> Result<(), LogError> {
    let filter = config.filter.to_env_filter();
    match config.format {
        LogFormat::Text => init_text(filter),
        LogFormat::Json => init_json(filter),
        LogFormat::Journald => init_journald(filter),
    }
}

fn init_text(filter: EnvFilter) -> Result<(), LogError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(Utc3339)
        .try_init()
        .map_err(|_| LogError::AlreadyInitialized)
}

fn init_json(filter: EnvFilter) -> Result<(), LogError> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_timer(Utc3339)
        .try_init()
        .map_err(|_| LogError::AlreadyInitialized)
}

#[cfg(target_os = "linux")]
fn init_journald(filter: EnvFilter) -> Result<(), LogError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let journald = tracing_journald::layer()?;
    tracing_subscriber::registry()
        .with(filter)
        .with(journald)
        .try_init()
        .map_err(|_| LogError::AlreadyInitialized)
}

#[cfg(not(target_os = "linux"))]
fn init_journald(_filter: EnvFilter) -> Result<(), LogError> {
    Err(LogError::Unsupported("journald output requires linux"))
}

/// RFC3339 UTC timestamps for the stdout formats.
struct Utc3339;

impl FormatTime for Utc3339 {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        match utc_stamp() {
            Some(stamp) => write!(w, "{stamp}"),
            None => write!(w, "<no-timestamp>"),
        }
    }
}

fn utc_stamp() -> Option<String> {
    OffsetDateTime::now_utc().format(&Rfc3339).ok()
}
