//! Tracing bootstrap for orc services.
//!
//! One call to [`init_logging`] installs the process-wide subscriber:
//! plain text or JSON on stdout, or journald on linux hosts. Verbosity
//! is driven by env-filter directives carried in [`LogConfig`], so a
//! config file can say `"filter": "orc_core=debug,info"` and get
//! per-crate levels without recompiling.

mod config;
mod error;
mod filter;
mod format;
mod init;

pub use config::LogConfig;
pub use error::LogError;
pub use filter::LogFilter;
pub use format::LogFormat;
pub use init::init_logging;
