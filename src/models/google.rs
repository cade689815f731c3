//! Google Books wire models
//!
//! Typed intermediate representation for the volumes API, so the normalizer
//! works on a validated structure instead of chasing nullable JSON paths.

use serde::Deserialize;

use super::book::{BookDetail, BookSummary, CoverImage, MISSING_TITLE, TARGET_LANGUAGE};

#[derive(Debug, Deserialize)]
pub struct VolumesResponse {
    #[serde(rename = "totalItems", default)]
    pub total_items: i64,
    #[serde(default)]
    pub items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
pub struct Volume {
    pub id: String,
    #[serde(rename = "volumeInfo", default)]
    pub volume_info: VolumeInfo,
    #[serde(rename = "saleInfo", default)]
    pub sale_info: SaleInfo,
}

#[derive(Debug, Default, Deserialize)]
pub struct VolumeInfo {
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    #[serde(rename = "publishedDate")]
    pub published_date: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "industryIdentifiers", default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,
    #[serde(rename = "pageCount")]
    pub page_count: Option<i64>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub language: Option<String>,
    #[serde(rename = "imageLinks")]
    pub image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
    #[serde(rename = "smallThumbnail")]
    pub small_thumbnail: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SaleInfo {
    pub country: Option<String>,
}

impl VolumeInfo {
    /// Preferred industry identifier: ISBN-13 over ISBN-10 over whatever else
    fn best_isbn(&self) -> Option<String> {
        let by_kind = |kind: &str| {
            self.industry_identifiers
                .iter()
                .find(|i| i.kind == kind)
                .map(|i| i.identifier.clone())
        };
        by_kind("ISBN_13")
            .or_else(|| by_kind("ISBN_10"))
            .or_else(|| self.industry_identifiers.first().map(|i| i.identifier.clone()))
    }

    fn cover(&self) -> Option<CoverImage> {
        let links = self.image_links.as_ref()?;
        // Google often serves http links, upgrade to https
        let secure = |u: &String| u.replace("http://", "https://");
        match (&links.thumbnail, &links.small_thumbnail) {
            (Some(t), Some(s)) => Some(CoverImage {
                thumbnail: secure(t),
                small_thumbnail: secure(s),
            }),
            (Some(t), None) => Some(CoverImage::single(secure(t))),
            (None, Some(s)) => Some(CoverImage::single(secure(s))),
            (None, None) => None,
        }
    }

    /// Two-letter language code, defaulted when the upstream omits it
    fn short_language(&self) -> String {
        let short: String = self
            .language
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(2)
            .flat_map(char::to_lowercase)
            .collect();
        if short.len() == 2 {
            short
        } else {
            TARGET_LANGUAGE.to_string()
        }
    }
}

impl From<Volume> for BookSummary {
    fn from(volume: Volume) -> Self {
        let info = &volume.volume_info;
        BookSummary {
            isbn: info.best_isbn(),
            cover: info.cover(),
            language: info.short_language(),
            title: info
                .title
                .clone()
                .unwrap_or_else(|| MISSING_TITLE.to_string()),
            authors: info.authors.clone(),
            publisher: info.publisher.clone(),
            published_date: info.published_date.clone(),
            categories: info.categories.clone(),
            sale_country: volume.sale_info.country,
            score: 0,
            id: volume.id,
        }
    }
}

impl From<Volume> for BookDetail {
    fn from(volume: Volume) -> Self {
        let description = volume.volume_info.description.clone();
        let page_count = volume.volume_info.page_count;
        BookDetail {
            summary: volume.into(),
            description,
            page_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volume(json: serde_json::Value) -> Volume {
        serde_json::from_value(json).expect("volume fixture")
    }

    #[test]
    fn test_summary_from_full_volume() {
        let v = volume(serde_json::json!({
            "id": "abc123",
            "volumeInfo": {
                "title": "Grande Sertão: Veredas",
                "authors": ["João Guimarães Rosa"],
                "publisher": "Companhia das Letras",
                "publishedDate": "2019",
                "industryIdentifiers": [
                    {"type": "ISBN_10", "identifier": "8535930973"},
                    {"type": "ISBN_13", "identifier": "9788535930979"}
                ],
                "categories": ["Fiction"],
                "language": "pt",
                "imageLinks": {
                    "thumbnail": "http://books.google.com/thumb.jpg",
                    "smallThumbnail": "http://books.google.com/small.jpg"
                }
            },
            "saleInfo": {"country": "BR"}
        }));

        let summary = BookSummary::from(v);
        assert_eq!(summary.id, "abc123");
        assert_eq!(summary.isbn.as_deref(), Some("9788535930979"));
        assert_eq!(summary.language, "pt");
        assert_eq!(summary.sale_country.as_deref(), Some("BR"));
        assert_eq!(
            summary.cover.as_ref().unwrap().thumbnail,
            "https://books.google.com/thumb.jpg"
        );
    }

    #[test]
    fn test_summary_defaults_on_empty_volume() {
        let summary = BookSummary::from(volume(serde_json::json!({"id": "x"})));
        assert_eq!(summary.title, MISSING_TITLE);
        assert_eq!(summary.language, "pt");
        assert!(summary.authors.is_empty());
        assert!(summary.cover.is_none());
        assert!(summary.isbn.is_none());
    }

    #[test]
    fn test_single_image_link_used_for_both_sizes() {
        let v = volume(serde_json::json!({
            "id": "x",
            "volumeInfo": {"imageLinks": {"thumbnail": "https://img/t.jpg"}}
        }));
        let cover = BookSummary::from(v).cover.unwrap();
        assert_eq!(cover.thumbnail, cover.small_thumbnail);
    }

    #[test]
    fn test_language_normalized_to_two_letters() {
        let v = volume(serde_json::json!({
            "id": "x",
            "volumeInfo": {"language": "PT-BR"}
        }));
        assert_eq!(BookSummary::from(v).language, "pt");
    }

    #[test]
    fn test_detail_carries_description_and_pages() {
        let v = volume(serde_json::json!({
            "id": "x",
            "volumeInfo": {"description": "Romance.", "pageCount": 608}
        }));
        let detail = BookDetail::from(v);
        assert_eq!(detail.description.as_deref(), Some("Romance."));
        assert_eq!(detail.page_count, Some(608));
    }
}
