use crate::config::ConfigError;
use crate::discovery::{CriteriaError, DiscoveryServiceError};
use crate::snapshot::SnapshotError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Application-level error surfaced by the binary and its handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("invalid search criteria: {0}")]
    Criteria(#[from] CriteriaError),
    #[error("donor discovery failed: {0}")]
    Discovery(#[from] DiscoveryServiceError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Criteria(_) | AppError::Snapshot(_) => StatusCode::BAD_REQUEST,
            AppError::Discovery(DiscoveryServiceError::Source(_)) => StatusCode::BAD_GATEWAY,
            AppError::Discovery(DiscoveryServiceError::Export(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
