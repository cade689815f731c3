//! Data models for Estante server

pub mod book;
pub mod google;
pub mod open_library;

pub use book::{BookDetail, BookSummary, CoverImage, SearchResults};
