//! Canonical book models shared by both upstream catalogs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Pair of cover image URLs. When the upstream only exposes one rendition,
/// both fields carry the same URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CoverImage {
    pub thumbnail: String,
    #[serde(rename = "smallThumbnail")]
    pub small_thumbnail: String,
}

impl CoverImage {
    /// Single-rendition cover, used for both sizes
    pub fn single(url: String) -> Self {
        Self {
            small_thumbnail: url.clone(),
            thumbnail: url,
        }
    }
}

/// One search-result item, normalized from either upstream catalog.
///
/// `language` is always a two-letter code, defaulted when the upstream omits
/// it, because clients assume presence. `isbn` and `sale_country` feed the
/// regional ranking and stay in the payload so clients can display them.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(rename = "publishedDate", skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    pub language: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<CoverImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(rename = "saleCountry", skip_serializing_if = "Option::is_none")]
    pub sale_country: Option<String>,
    /// Regional score computed by the ranker; 0 until ranked
    #[serde(default)]
    pub score: i32,
}

/// Full detail for a single book, merged from up to two upstream records
/// with edition-level fields taking precedence over work-level ones.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookDetail {
    #[serde(flatten)]
    pub summary: BookSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "pageCount", skip_serializing_if = "Option::is_none")]
    pub page_count: Option<i64>,
}

/// Search response envelope.
///
/// `total_items` is the upstream total, not the length of `items`: the
/// regional filter can shrink the list, the count is passed through so
/// clients can keep paginating against the upstream result set.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResults {
    #[serde(rename = "totalItems")]
    pub total_items: i64,
    pub items: Vec<BookSummary>,
}

/// Placeholder used when neither the edition nor the work carries a title
pub const MISSING_TITLE: &str = "Título não disponível";

/// Two-letter code emitted for every normalized record
pub const TARGET_LANGUAGE: &str = "pt";

impl BookSummary {
    /// Empty summary with defaulted language, filled in by the normalizers
    pub fn empty(id: String) -> Self {
        Self {
            id,
            title: MISSING_TITLE.to_string(),
            authors: Vec::new(),
            publisher: None,
            published_date: None,
            language: TARGET_LANGUAGE.to_string(),
            categories: Vec::new(),
            cover: None,
            isbn: None,
            sale_country: None,
            score: 0,
        }
    }
}
