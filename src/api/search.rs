//! Search endpoints, one per upstream catalog

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::{AppError, AppResult},
    models::SearchResults,
    AppState,
};

use super::cache_control;

/// Query parameters shared by both search routes
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Free-text query (required)
    pub q: Option<String>,
    /// Language restriction forwarded upstream
    pub lang: Option<String>,
    /// Upstream ordering: relevance (default) or newest
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
    #[serde(rename = "startIndex")]
    pub start_index: Option<i64>,
    #[serde(rename = "maxResults")]
    pub max_results: Option<i64>,
}

impl SearchParams {
    /// The text query, rejected when missing or blank
    pub fn query(&self) -> AppResult<&str> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| AppError::Validation("Parâmetro q é obrigatório".to_string()))
    }
}

/// Search Google Books volumes
#[utoipa::path(
    get,
    path = "/search",
    tag = "search",
    params(SearchParams),
    responses(
        (status = 200, description = "Ranked search results", body = SearchResults),
        (status = 400, description = "Missing q parameter"),
        (status = 500, description = "API key not configured")
    )
)]
pub async fn google_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let results = state.services.google_books.search(&params).await?;
    Ok((
        cache_control(state.config.cache.search_max_age),
        Json(results),
    ))
}

/// Search Open Library works
#[utoipa::path(
    get,
    path = "/ol/search",
    tag = "search",
    params(SearchParams),
    responses(
        (status = 200, description = "Ranked search results", body = SearchResults),
        (status = 400, description = "Missing q parameter")
    )
)]
pub async fn open_library_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let results = state.services.open_library.search(&params).await?;
    Ok((
        cache_control(state.config.cache.search_max_age),
        Json(results),
    ))
}
