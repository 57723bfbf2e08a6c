use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid instance identity: {0}")]
    InvalidIdent(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
