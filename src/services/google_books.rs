//! Google Books client service
//!
//! Wraps the keyed volumes API: query building, transport, and normalization
//! of the response into canonical summaries, with the regional pipeline
//! applied on the search path.

use reqwest::Client;

use crate::{
    api::search::SearchParams,
    error::{AppError, AppResult},
    models::{
        google::{Volume, VolumesResponse},
        BookDetail, SearchResults,
    },
    services::ranking,
};

#[derive(Clone)]
pub struct GoogleBooksService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GoogleBooksService {
    pub fn new(client: Client, base_url: String, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Whether a key is configured; surfaced by the health endpoint
    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("GOOGLE_BOOKS_KEY não configurada".to_string()))
    }

    /// Search volumes and run the results through the regional pipeline
    pub async fn search(&self, params: &SearchParams) -> AppResult<SearchResults> {
        let q = params.query()?;
        let key = self.key()?;
        let url = format!("{}/volumes", self.base_url);
        let start_index = params.start_index.unwrap_or(0).to_string();
        let max_results = params.max_results.unwrap_or(24).to_string();

        let mut query: Vec<(&str, &str)> = vec![
            ("q", q),
            ("orderBy", params.order_by.as_deref().unwrap_or("relevance")),
            ("printType", "books"),
            ("startIndex", &start_index),
            ("maxResults", &max_results),
            ("key", key),
        ];
        if let Some(lang) = params.lang.as_deref() {
            query.push(("langRestrict", lang));
        }

        tracing::debug!("Google Books search: q={}", q);
        let response = self.client.get(&url).query(&query).send().await?;
        if !response.status().is_success() {
            return Err(AppError::UpstreamStatus(response.status().as_u16()));
        }
        let body: VolumesResponse = response.json().await?;

        let items = body
            .items
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(SearchResults {
            // Upstream total, kept even though the filter may shrink the list
            total_items: body.total_items,
            items: ranking::filter_and_rank(items),
        })
    }

    /// Fetch a single volume by id
    pub async fn detail(&self, id: &str) -> AppResult<BookDetail> {
        let key = self.key()?;
        let url = format!("{}/volumes/{}", self.base_url, id);

        tracing::debug!("Google Books detail: id={}", id);
        let response = self
            .client
            .get(&url)
            .query(&[("key", key)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(AppError::UpstreamStatus(response.status().as_u16()));
        }
        let volume: Volume = response.json().await?;
        Ok(volume.into())
    }
}
