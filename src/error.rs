//! Error types for Estante server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed request parameter
    #[error("{0}")]
    Validation(String),

    /// Required server-side credential is not configured
    #[error("{0}")]
    Configuration(String),

    /// Upstream transport failure (connect, TLS, body decode)
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Upstream answered with a non-success HTTP status
    #[error("Upstream returned status {0}")]
    UpstreamStatus(u16),

    /// Identifier could not be resolved against any upstream endpoint
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Upstream(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg, None)
            }
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Erro ao buscar dados da API".to_string(),
                    Some(msg),
                )
            }
            AppError::UpstreamStatus(code) => {
                // 404 from the catalog is meaningful to the caller, anything
                // else is the upstream's problem.
                let status = match code {
                    404 => StatusCode::NOT_FOUND,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (
                    status,
                    "Erro ao buscar dados da API".to_string(),
                    Some(format!("upstream status {}", code)),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
        };

        let body = Json(ErrorResponse { error, details });
        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
