use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no router instances available: process is starting up or shutting down")]
    NoInstances,

    #[error("admin action failed: {0}")]
    ActionFailed(String),
}
