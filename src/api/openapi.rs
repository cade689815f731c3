//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{detail, health, search};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Estante API",
        version = "1.0.0",
        description = "Book search proxy over Google Books and Open Library, ranked for the Brazilian market",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        health::health_check,
        search::google_search,
        search::open_library_search,
        detail::google_detail,
        detail::open_library_detail,
    ),
    components(
        schemas(
            health::HealthResponse,
            crate::models::BookSummary,
            crate::models::BookDetail,
            crate::models::CoverImage,
            crate::models::SearchResults,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "search", description = "Catalog search"),
        (name = "detail", description = "Single-book detail")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
