//! Estante - Brazilian book search proxy
//!
//! Proxies search and detail queries to Google Books and Open Library,
//! normalizes both catalogs into one canonical shape, and ranks results
//! for the Brazilian market.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
