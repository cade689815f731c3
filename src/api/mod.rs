//! API handlers for Estante REST endpoints

pub mod detail;
pub mod health;
pub mod openapi;
pub mod search;

use axum::{
    http::{header, HeaderName},
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Advisory Cache-Control header for successful responses.
/// Nothing server-side enforces it; CDNs in front of the service do.
pub(crate) fn cache_control(max_age: u64) -> [(HeaderName, String); 1] {
    [(
        header::CACHE_CONTROL,
        format!("s-maxage={}, stale-while-revalidate", max_age),
    )]
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/search", get(search::google_search))
        .route("/detail", get(detail::google_detail))
        .route("/ol/search", get(search::open_library_search))
        .route("/ol/detail", get(detail::open_library_detail))
        .route("/health", get(health::health_check))
        .with_state(state)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
