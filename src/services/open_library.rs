//! Open Library client service
//!
//! The catalog splits a book across edition, work, and author records, so
//! detail resolution classifies the incoming identifier, fetches what it
//! needs in order, and merges the pieces. The raw fetches sit behind a trait
//! so the resolution logic is testable without the network.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;

use crate::{
    api::search::SearchParams,
    error::{AppError, AppResult},
    models::{
        open_library::{
            bare_key, classify_identifier, merge_detail, AuthorRecord, Edition, IdentifierKind,
            SearchResponse, Work,
        },
        BookDetail, SearchResults,
    },
    services::ranking,
};

/// Raw Open Library endpoints, one method per record shape
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpenLibraryApi: Send + Sync {
    async fn search(&self, q: &str, offset: i64, limit: i64) -> AppResult<SearchResponse>;
    async fn edition(&self, id: &str) -> AppResult<Edition>;
    async fn edition_by_isbn(&self, isbn: &str) -> AppResult<Edition>;
    async fn work(&self, id: &str) -> AppResult<Work>;
    async fn author(&self, id: &str) -> AppResult<AuthorRecord>;
}

/// reqwest-backed implementation of [`OpenLibraryApi`]
pub struct HttpOpenLibraryApi {
    client: Client,
    base_url: String,
}

impl HttpOpenLibraryApi {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).query(query).send().await?;
        if !response.status().is_success() {
            return Err(AppError::UpstreamStatus(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl OpenLibraryApi for HttpOpenLibraryApi {
    async fn search(&self, q: &str, offset: i64, limit: i64) -> AppResult<SearchResponse> {
        self.get_json(
            "/search.json",
            &[
                ("q", q),
                ("lang", "pt"),
                (
                    "fields",
                    "key,title,author_name,publisher,first_publish_year,cover_i,isbn,language,subject",
                ),
                ("offset", &offset.to_string()),
                ("limit", &limit.to_string()),
            ],
        )
        .await
    }

    async fn edition(&self, id: &str) -> AppResult<Edition> {
        self.get_json(&format!("/books/{}.json", id), &[]).await
    }

    async fn edition_by_isbn(&self, isbn: &str) -> AppResult<Edition> {
        self.get_json(&format!("/isbn/{}.json", isbn), &[]).await
    }

    async fn work(&self, id: &str) -> AppResult<Work> {
        self.get_json(&format!("/works/{}.json", id), &[]).await
    }

    async fn author(&self, id: &str) -> AppResult<AuthorRecord> {
        self.get_json(&format!("/authors/{}.json", id), &[]).await
    }
}

#[derive(Clone)]
pub struct OpenLibraryService {
    api: Arc<dyn OpenLibraryApi>,
}

impl OpenLibraryService {
    pub fn new(api: Arc<dyn OpenLibraryApi>) -> Self {
        Self { api }
    }

    /// Search works and run the results through the regional pipeline
    pub async fn search(&self, params: &SearchParams) -> AppResult<SearchResults> {
        let q = params.query()?;
        let offset = params.start_index.unwrap_or(0);
        let limit = params.max_results.unwrap_or(24);

        tracing::debug!("Open Library search: q={}", q);
        let response = self.api.search(q, offset, limit).await?;

        let items = response.docs.into_iter().map(Into::into).collect();
        Ok(SearchResults {
            total_items: response.num_found,
            items: ranking::filter_and_rank(items),
        })
    }

    /// Resolve a catalog identifier into one merged detail record
    pub async fn resolve_detail(&self, id: &str) -> AppResult<BookDetail> {
        let (edition, work) = match classify_identifier(id) {
            IdentifierKind::Edition => {
                let edition = self.api.edition(id).await?;
                let work = self.parent_work(&edition).await;
                (Some(edition), work)
            }
            IdentifierKind::Work => (None, Some(self.api.work(id).await?)),
            IdentifierKind::Unknown => self.resolve_unknown(id).await?,
        };

        let authors = self.resolve_authors(edition.as_ref(), work.as_ref()).await;
        Ok(merge_detail(id, edition.as_ref(), work.as_ref(), authors))
    }

    /// Best-effort fetch of the work an edition references
    async fn parent_work(&self, edition: &Edition) -> Option<Work> {
        let reference = edition.works.first()?;
        match self.api.work(&bare_key(&reference.key)).await {
            Ok(work) => Some(work),
            Err(e) => {
                tracing::warn!("parent work fetch failed for {}: {}", reference.key, e);
                None
            }
        }
    }

    /// Edition-first fallback chain for identifiers that match no key pattern
    async fn resolve_unknown(&self, id: &str) -> AppResult<(Option<Edition>, Option<Work>)> {
        let attempt = if looks_like_isbn(id) {
            self.api.edition_by_isbn(id).await
        } else {
            self.api.edition(id).await
        };
        match attempt {
            Ok(edition) => {
                let work = self.parent_work(&edition).await;
                Ok((Some(edition), work))
            }
            Err(edition_err) => {
                tracing::debug!("edition fetch failed for {}: {}", id, edition_err);
                match self.api.work(id).await {
                    Ok(work) => Ok((None, Some(work))),
                    Err(_) => Err(AppError::NotFound(format!("Livro não encontrado: {}", id))),
                }
            }
        }
    }

    /// Resolve author reference keys to names, in reference order.
    /// Lookups run concurrently; individual failures drop that author only.
    async fn resolve_authors(&self, edition: Option<&Edition>, work: Option<&Work>) -> Vec<String> {
        let keys: Vec<String> = match edition.filter(|e| !e.authors.is_empty()) {
            Some(e) => e.authors.iter().map(|a| bare_key(&a.key)).collect(),
            None => work
                .map(|w| w.authors.iter().map(|a| bare_key(&a.author.key)).collect())
                .unwrap_or_default(),
        };

        let lookups = keys.iter().map(|key| self.api.author(key));
        join_all(lookups)
            .await
            .into_iter()
            .zip(&keys)
            .filter_map(|(result, key)| match result {
                Ok(record) => record.display_name(),
                Err(e) => {
                    tracing::debug!("author lookup failed for {}: {}", key, e);
                    None
                }
            })
            .collect()
    }
}

/// ISBN-10 or ISBN-13 shape: digits with an optional trailing check X
fn looks_like_isbn(id: &str) -> bool {
    let bytes = id.as_bytes();
    matches!(bytes.len(), 10 | 13)
        && bytes[..bytes.len() - 1].iter().all(u8::is_ascii_digit)
        && (bytes[bytes.len() - 1].is_ascii_digit() || bytes[bytes.len() - 1] == b'X')
}
