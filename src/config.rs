//! Configuration management for Estante server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Google Books API key. The Google-backed routes refuse to run without it.
    pub google_books_key: Option<String>,
    pub google_books_url: String,
    pub open_library_url: String,
    /// Per-request timeout applied to the shared reqwest client
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// s-maxage for search responses, in seconds
    pub search_max_age: u64,
    /// s-maxage for detail responses, in seconds
    pub detail_max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix ESTANTE_)
            .add_source(
                Environment::with_prefix("ESTANTE")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override the API key from GOOGLE_BOOKS_KEY env var if present
            .set_override_option(
                "upstream.google_books_key",
                env::var("GOOGLE_BOOKS_KEY").ok(),
            )?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            google_books_key: None,
            google_books_url: "https://www.googleapis.com/books/v1".to_string(),
            open_library_url: "https://openlibrary.org".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            search_max_age: 86400,
            detail_max_age: 3600,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
