use thiserror::Error;

/// Errors raised while configuring the tracing pipeline.
#[derive(Debug, Error)]
pub enum LogError {
    /// The filter string was rejected by the env-filter parser.
    #[error("invalid log filter '{0}': {1}")]
    InvalidFilter(String, String),

    /// The format string named no known output format.
    #[error("unknown log format '{0}', expected text, json or journald")]
    UnknownFormat(String),

    /// A global subscriber is already installed in this process.
    #[error("logging is already initialized")]
    AlreadyInitialized,

    /// The requested output does not exist on this platform.
    #[error("{0}")]
    Unsupported(&'static str),

    /// The journald socket could not be opened.
    #[error("journald connection failed: {0}")]
    Journald(#[from] std::io::Error),
}
