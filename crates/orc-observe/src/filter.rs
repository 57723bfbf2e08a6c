use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::LogError;

/// Env-filter directive string, validated at construction.
///
/// Accepts anything the env-filter syntax allows: a bare level (`info`),
/// per-target overrides (`orc_core=debug,info`) or a comma-separated mix
/// of both. Bad directives are rejected here, at the config boundary,
/// instead of surfacing later when the subscriber is built.
///
/// ```
/// use orc_observe::LogFilter;
///
/// let quiet = LogFilter::new("warn").unwrap();
/// assert_eq!(quiet.as_str(), "warn");
/// assert!(LogFilter::new("no=such=syntax").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct LogFilter(String);

impl LogFilter {
    /// Validate `directives` and wrap them.
    pub fn new(directives: impl Into<String>) -> Result<Self, LogError> {
        let directives = directives.into();
        match EnvFilter::try_new(&directives) {
            Ok(_) => Ok(Self(directives)),
            Err(e) => Err(LogError::InvalidFilter(directives, e.to_string())),
        }
    }

    /// The directive string as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the filter for subscriber construction.
    pub(crate) fn to_env_filter(&self) -> EnvFilter {
        // Validated in `new`, re-parsing the same string cannot fail.
        EnvFilter::try_new(&self.0).expect("validated directives must parse")
    }
}

impl Default for LogFilter {
    fn default() -> Self {
        Self("info".to_string())
    }
}

impl FromStr for LogFilter {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LogFilter {
    type Error = LogError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<LogFilter> for String {
    fn from(filter: LogFilter) -> Self {
        filter.0
    }
}

impl fmt::Display for LogFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
