//! Health check endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always true when the process answers
    pub ok: bool,
    /// Whether a Google Books API key is configured
    #[serde(rename = "hasKey")]
    pub has_key: bool,
}

/// Health check. Never fails, even without a configured key.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        has_key: state.services.google_books.has_key(),
    })
}
