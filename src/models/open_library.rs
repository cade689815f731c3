//! Open Library wire models
//!
//! Covers the three record shapes the catalog exposes (search docs, editions,
//! works) plus the classification of incoming identifiers that decides which
//! endpoints the detail resolver has to hit.

use serde::Deserialize;
use serde_json::Value;

use super::book::{BookDetail, BookSummary, CoverImage, MISSING_TITLE, TARGET_LANGUAGE};

/// What kind of catalog key a client handed us
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    /// `OL<digits>M`, a specific published edition
    Edition,
    /// `OL<digits>W`, the abstract work
    Work,
    /// Anything else (bare ISBNs included); resolved edition-first
    Unknown,
}

/// Classify an identifier by its Open Library key pattern
pub fn classify_identifier(id: &str) -> IdentifierKind {
    let Some(rest) = id.strip_prefix("OL") else {
        return IdentifierKind::Unknown;
    };
    if !rest.is_ascii() {
        return IdentifierKind::Unknown;
    }
    let (digits, suffix) = rest.split_at(rest.len().saturating_sub(1));
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return IdentifierKind::Unknown;
    }
    match suffix {
        "M" => IdentifierKind::Edition,
        "W" => IdentifierKind::Work,
        _ => IdentifierKind::Unknown,
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "numFound", default)]
    pub num_found: i64,
    #[serde(default)]
    pub docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
pub struct SearchDoc {
    pub key: String,
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Vec<String>,
    #[serde(default)]
    pub publisher: Vec<String>,
    pub first_publish_year: Option<i64>,
    pub cover_i: Option<i64>,
    #[serde(default)]
    pub isbn: Vec<String>,
    #[serde(default)]
    pub language: Vec<String>,
    #[serde(default)]
    pub subject: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Edition {
    pub key: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub publishers: Vec<String>,
    pub publish_date: Option<String>,
    pub number_of_pages: Option<i64>,
    #[serde(default)]
    pub covers: Vec<i64>,
    #[serde(default)]
    pub isbn_13: Vec<String>,
    #[serde(default)]
    pub isbn_10: Vec<String>,
    #[serde(default)]
    pub languages: Vec<KeyRef>,
    #[serde(default)]
    pub works: Vec<KeyRef>,
    #[serde(default)]
    pub authors: Vec<KeyRef>,
    pub description: Option<Value>,
    #[serde(default)]
    pub subjects: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Work {
    pub key: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub covers: Vec<i64>,
    #[serde(default)]
    pub authors: Vec<WorkAuthorRef>,
    pub description: Option<Value>,
    #[serde(default)]
    pub subjects: Vec<String>,
}

/// `{ "key": "/authors/OL1A" }` style reference
#[derive(Debug, Deserialize)]
pub struct KeyRef {
    pub key: String,
}

/// Works wrap their author references one level deeper than editions
#[derive(Debug, Deserialize)]
pub struct WorkAuthorRef {
    pub author: KeyRef,
}

#[derive(Debug, Deserialize)]
pub struct AuthorRecord {
    pub name: Option<String>,
    pub personal_name: Option<String>,
}

impl AuthorRecord {
    pub fn display_name(self) -> Option<String> {
        self.name.or(self.personal_name)
    }
}

/// Strip the `/books/`, `/works/` or `/authors/` path prefix off a key
pub fn bare_key(key: &str) -> String {
    key.rsplit('/').next().unwrap_or(key).to_string()
}

pub fn cover_url_from_id(cover_id: i64) -> String {
    format!("https://covers.openlibrary.org/b/id/{}-M.jpg", cover_id)
}

pub fn cover_url_from_isbn(isbn: &str) -> String {
    format!("https://covers.openlibrary.org/b/isbn/{}-M.jpg", isbn)
}

/// Description records come as a plain string or a `{value}` wrapper;
/// anything else is treated as absent.
pub fn normalize_description(raw: Option<&Value>) -> Option<String> {
    match raw? {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get("value").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// True when any language reference carries the fixed `/por` suffix
pub fn has_portuguese_language_ref(languages: &[KeyRef]) -> bool {
    languages.iter().any(|l| l.key.ends_with("/por"))
}

impl Edition {
    /// Preferred industry identifier: ISBN-13 over ISBN-10
    pub fn best_isbn(&self) -> Option<String> {
        self.isbn_13
            .first()
            .or_else(|| self.isbn_10.first())
            .cloned()
    }

    /// Cover priority: numeric cover id, then ISBN-derived URL
    pub fn cover(&self) -> Option<CoverImage> {
        self.covers
            .first()
            .map(|id| cover_url_from_id(*id))
            .or_else(|| self.best_isbn().map(|isbn| cover_url_from_isbn(&isbn)))
            .map(CoverImage::single)
    }
}

impl Work {
    pub fn cover(&self) -> Option<CoverImage> {
        self.covers
            .first()
            .map(|id| CoverImage::single(cover_url_from_id(*id)))
    }
}

impl From<SearchDoc> for BookSummary {
    fn from(doc: SearchDoc) -> Self {
        let cover = doc
            .cover_i
            .map(cover_url_from_id)
            .or_else(|| doc.isbn.first().map(|i| cover_url_from_isbn(i)))
            .map(CoverImage::single);
        // Results come from a Portuguese-restricted query; the bare codes are
        // only checked, the emitted code is fixed.
        if !doc.language.iter().any(|l| l.ends_with("por")) {
            tracing::debug!("doc {} carries no Portuguese language code", doc.key);
        }
        BookSummary {
            id: bare_key(&doc.key),
            title: doc.title.unwrap_or_else(|| MISSING_TITLE.to_string()),
            authors: doc.author_name,
            publisher: doc.publisher.into_iter().next(),
            published_date: doc.first_publish_year.map(|y| y.to_string()),
            language: TARGET_LANGUAGE.to_string(),
            categories: doc.subject,
            cover,
            isbn: doc
                .isbn
                .iter()
                .find(|i| i.len() == 13)
                .or_else(|| doc.isbn.first())
                .cloned(),
            sale_country: None,
            score: 0,
        }
    }
}

/// Merge an edition and its parent work into one detail record.
///
/// Edition fields win whenever both records carry a value; `authors` is
/// resolved separately by the service since it needs lookups.
pub fn merge_detail(
    requested_id: &str,
    edition: Option<&Edition>,
    work: Option<&Work>,
    authors: Vec<String>,
) -> BookDetail {
    let id = edition
        .and_then(|e| e.key.as_deref())
        .or_else(|| work.and_then(|w| w.key.as_deref()))
        .map(bare_key)
        .unwrap_or_else(|| requested_id.to_string());

    let title = edition
        .and_then(|e| e.title.clone())
        .or_else(|| work.and_then(|w| w.title.clone()))
        .unwrap_or_else(|| MISSING_TITLE.to_string());

    let description = edition
        .and_then(|e| normalize_description(e.description.as_ref()))
        .or_else(|| work.and_then(|w| normalize_description(w.description.as_ref())));

    let cover = edition
        .and_then(Edition::cover)
        .or_else(|| work.and_then(Work::cover));

    let categories = edition
        .map(|e| e.subjects.clone())
        .filter(|s| !s.is_empty())
        .or_else(|| work.map(|w| w.subjects.clone()))
        .unwrap_or_default();

    if let Some(e) = edition {
        if !has_portuguese_language_ref(&e.languages) {
            tracing::debug!("edition {} carries no Portuguese language ref", id);
        }
    }

    let mut summary = BookSummary::empty(id);
    summary.title = title;
    summary.authors = authors;
    summary.publisher = edition.and_then(|e| e.publishers.first().cloned());
    summary.published_date = edition.and_then(|e| e.publish_date.clone());
    summary.categories = categories;
    summary.cover = cover;
    summary.isbn = edition.and_then(Edition::best_isbn);

    BookDetail {
        summary,
        description,
        page_count: edition.and_then(|e| e.number_of_pages),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_edition_and_work_keys() {
        assert_eq!(classify_identifier("OL7353617M"), IdentifierKind::Edition);
        assert_eq!(classify_identifier("OL45883W"), IdentifierKind::Work);
    }

    #[test]
    fn test_classify_unknown_identifiers() {
        assert_eq!(classify_identifier("9788535930979"), IdentifierKind::Unknown);
        assert_eq!(classify_identifier("OLM"), IdentifierKind::Unknown);
        assert_eq!(classify_identifier("OL12A"), IdentifierKind::Unknown);
        assert_eq!(classify_identifier("OLé12M"), IdentifierKind::Unknown);
        assert_eq!(classify_identifier(""), IdentifierKind::Unknown);
    }

    #[test]
    fn test_description_shapes() {
        let text = serde_json::json!("Um romance.");
        let wrapped = serde_json::json!({"type": "/type/text", "value": "Um romance."});
        let odd = serde_json::json!(["not", "a", "description"]);

        assert_eq!(
            normalize_description(Some(&text)).as_deref(),
            Some("Um romance.")
        );
        assert_eq!(
            normalize_description(Some(&wrapped)).as_deref(),
            Some("Um romance.")
        );
        assert_eq!(normalize_description(Some(&odd)), None);
        assert_eq!(normalize_description(None), None);
    }

    #[test]
    fn test_edition_cover_prefers_cover_id_over_isbn() {
        let edition: Edition = serde_json::from_value(serde_json::json!({
            "covers": [12345],
            "isbn_13": ["9788535930979"]
        }))
        .unwrap();
        let cover = edition.cover().unwrap();
        assert_eq!(cover.thumbnail, "https://covers.openlibrary.org/b/id/12345-M.jpg");
        assert_eq!(cover.thumbnail, cover.small_thumbnail);
    }

    #[test]
    fn test_edition_cover_falls_back_to_isbn() {
        let edition: Edition = serde_json::from_value(serde_json::json!({
            "isbn_13": ["9788535930979"]
        }))
        .unwrap();
        assert_eq!(
            edition.cover().unwrap().thumbnail,
            "https://covers.openlibrary.org/b/isbn/9788535930979-M.jpg"
        );
        assert!(Edition::default().cover().is_none());
    }

    #[test]
    fn test_search_doc_normalization_defaults() {
        let doc: SearchDoc = serde_json::from_value(serde_json::json!({
            "key": "/works/OL45883W"
        }))
        .unwrap();
        let summary = BookSummary::from(doc);
        assert_eq!(summary.id, "OL45883W");
        assert_eq!(summary.title, MISSING_TITLE);
        assert_eq!(summary.language, "pt");
        assert!(summary.cover.is_none());
    }

    #[test]
    fn test_merge_prefers_edition_fields() {
        let edition: Edition = serde_json::from_value(serde_json::json!({
            "key": "/books/OL1M",
            "title": "Edição brasileira",
            "publishers": ["Companhia das Letras"],
            "description": "Texto da edição",
            "number_of_pages": 328
        }))
        .unwrap();
        let work: Work = serde_json::from_value(serde_json::json!({
            "key": "/works/OL2W",
            "title": "Original work",
            "description": {"value": "Texto da obra"},
            "covers": [99]
        }))
        .unwrap();

        let detail = merge_detail("OL1M", Some(&edition), Some(&work), vec![]);
        assert_eq!(detail.summary.id, "OL1M");
        assert_eq!(detail.summary.title, "Edição brasileira");
        assert_eq!(detail.description.as_deref(), Some("Texto da edição"));
        assert_eq!(detail.page_count, Some(328));
        // edition has no cover, work's is used
        assert_eq!(
            detail.summary.cover.unwrap().thumbnail,
            "https://covers.openlibrary.org/b/id/99-M.jpg"
        );
    }

    #[test]
    fn test_merge_work_only_yields_empty_authors() {
        let work: Work = serde_json::from_value(serde_json::json!({
            "key": "/works/OL2W",
            "title": "Obra sem edições"
        }))
        .unwrap();
        let detail = merge_detail("OL2W", None, Some(&work), vec![]);
        assert_eq!(detail.summary.title, "Obra sem edições");
        assert!(detail.summary.authors.is_empty());
        assert!(detail.summary.isbn.is_none());
    }
}
