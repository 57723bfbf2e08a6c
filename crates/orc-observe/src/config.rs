use serde::{Deserialize, Serialize};

use crate::{filter::LogFilter, format::LogFormat};

/// Logging section of a service configuration file.
///
/// Both keys are optional, so a partial section (or a missing one, with
/// `#[serde(default)]` on the parent) yields plain text at `info`:
///
/// ```json
/// { "filter": "orc_core=debug,info", "format": "json" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Env-filter directives controlling verbosity per target.
    pub filter: LogFilter,
    /// Output format.
    pub format: LogFormat,
}

impl LogConfig {
    /// Replace the filter.
    pub fn with_filter(mut self, filter: LogFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Replace the output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_the_defaults() {
        let config: LogConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.filter.as_str(), "info");
        assert_eq!(config.format, LogFormat::Text);
    }

    #[test]
    fn partial_section_keeps_the_other_default() {
        let config: LogConfig = serde_json::from_str(r#"{"format":"json"}"#).unwrap();
        assert_eq!(config.filter.as_str(), "info");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn invalid_filter_fails_the_whole_section() {
        let result: Result<LogConfig, _> = serde_json::from_str(r#"{"filter":"== nope =="}"#);
        assert!(result.is_err());
    }

    #[test]
    fn builders_replace_fields() {
        let config = LogConfig::default()
            .with_filter(LogFilter::new("warn").unwrap())
            .with_format(LogFormat::Journald);
        assert_eq!(config.filter.as_str(), "warn");
        assert_eq!(config.format, LogFormat::Journald);
    }
}
