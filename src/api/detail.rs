//! Detail endpoints, one per upstream catalog

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::{AppError, AppResult},
    models::BookDetail,
    AppState,
};

use super::cache_control;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DetailParams {
    /// Catalog identifier (required)
    pub id: Option<String>,
}

impl DetailParams {
    fn id(&self) -> AppResult<&str> {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::Validation("Parâmetro id é obrigatório".to_string()))
    }
}

/// Fetch one Google Books volume
#[utoipa::path(
    get,
    path = "/detail",
    tag = "detail",
    params(DetailParams),
    responses(
        (status = 200, description = "Book detail", body = BookDetail),
        (status = 400, description = "Missing id parameter"),
        (status = 404, description = "Volume not found")
    )
)]
pub async fn google_detail(
    State(state): State<AppState>,
    Query(params): Query<DetailParams>,
) -> AppResult<impl IntoResponse> {
    let detail = state.services.google_books.detail(params.id()?).await?;
    Ok((
        cache_control(state.config.cache.detail_max_age),
        Json(detail),
    ))
}

/// Resolve an Open Library identifier into a merged edition/work detail
#[utoipa::path(
    get,
    path = "/ol/detail",
    tag = "detail",
    params(DetailParams),
    responses(
        (status = 200, description = "Book detail", body = BookDetail),
        (status = 400, description = "Missing id parameter"),
        (status = 404, description = "Identifier unresolvable")
    )
)]
pub async fn open_library_detail(
    State(state): State<AppState>,
    Query(params): Query<DetailParams>,
) -> AppResult<impl IntoResponse> {
    let detail = state
        .services
        .open_library
        .resolve_detail(params.id()?)
        .await?;
    Ok((
        cache_control(state.config.cache.detail_max_age),
        Json(detail),
    ))
}
