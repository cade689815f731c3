//! Upstream clients and the ranking pipeline

pub mod google_books;
pub mod open_library;
pub mod ranking;

use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub google_books: google_books::GoogleBooksService,
    pub open_library: open_library::OpenLibraryService,
}

impl Services {
    /// Create all services sharing one HTTP client
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream.timeout_seconds))
            .build()
            .map_err(|e| AppError::Configuration(e.to_string()))?;

        let open_library_api = open_library::HttpOpenLibraryApi::new(
            client.clone(),
            config.upstream.open_library_url.clone(),
        );

        Ok(Self {
            google_books: google_books::GoogleBooksService::new(
                client,
                config.upstream.google_books_url.clone(),
                config.upstream.google_books_key.clone(),
            ),
            open_library: open_library::OpenLibraryService::new(Arc::new(open_library_api)),
        })
    }
}
