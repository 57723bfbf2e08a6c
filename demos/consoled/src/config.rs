use std::{fs, path::Path};

use serde::Deserialize;

use orc_observe::LogConfig;

/// Demo console configuration, read from an optional JSON file.
///
/// Every field has a default, so a partial file (or none at all) works.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Listen address of the HTTP console.
    pub listen: String,
    /// Logging bootstrap settings.
    pub log: LogConfig,
    /// Flat menu table overriding the built-in one (name,desc,url,icon,...).
    pub menu: Option<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:7657".to_string(),
            log: LogConfig::default(),
            menu: None,
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from `path`, falling back to defaults when no
    /// path was given.
    pub fn load_or_default(path: Option<&str>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(Path::new(path)),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)?;
        let cfg = serde_json::from_str(&raw)?;
        Ok(cfg)
    }
}
