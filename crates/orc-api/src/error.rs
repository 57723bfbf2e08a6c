use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use orc_core::CoreError;

/// Errors surfaced by the HTTP layer.
///
/// Most console failures never reach this type: invalid triggers are
/// absorbed by the gate and section-render failures degrade to empty
/// sections. What remains is the transient empty-registry condition and
/// plain socket I/O.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Core-level failure, in practice the empty-registry condition.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Socket-level failure while binding or serving.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Core(CoreError::NoInstances) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Core(_) | ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_instances_maps_to_service_unavailable() {
        let resp = ApiError::from(CoreError::NoInstances).into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn io_failure_maps_to_internal_error() {
        let err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let resp = ApiError::from(err).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
