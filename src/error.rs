//! Error handling for the weather forecast service
//!
//! Every failure mode of the fetch/save pipeline is a typed variant here;
//! handlers return `AppResult` and the `IntoResponse` impl turns each
//! variant into a JSON `{"error": ...}` body with a matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Bad caller input: empty city/user name, malformed save payload
    #[error("{0}")]
    InvalidInput(String),

    /// Missing configuration (API key); degrades the request, not the process
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream provider did not answer within the configured timeout
    #[error("Weather service timeout - please try again")]
    UpstreamTimeout,

    /// Could not establish a connection to the upstream provider
    #[error("Unable to connect to weather service")]
    UpstreamUnreachable,

    /// Upstream answered with an error envelope; carries its message verbatim
    #[error("{0}")]
    Upstream(String),

    /// Upstream succeeded but produced nothing usable
    #[error("No forecast data available")]
    NoData,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_REQUEST,
            AppError::NoData => StatusCode::NOT_FOUND,
            AppError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::UpstreamUnreachable => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Detail stays server-side; clients get the display message only
        tracing::error!("Error: {:?}", self);

        let message = match &self {
            AppError::Database(_) => "Internal server error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
