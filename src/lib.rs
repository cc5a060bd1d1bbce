/// Catalog Scraper
///
/// Fetches public search and video pages from a video catalog site and turns
/// them into typed search results and video detail records.

pub mod error;
pub mod config;
pub mod fetcher;
pub mod document;
pub mod catalog;
pub mod envelope;
pub mod service;

#[cfg(feature = "api")]
pub mod api;

// Re-export main types for easy access
pub use crate::config::{Config, ConfigBuilder};
pub use crate::error::{ScrapeError, GENERIC_FAILURE_MESSAGE};
pub use crate::fetcher::{HttpFetcher, PageFetcher};
pub use crate::document::Document;
pub use crate::catalog::{QualityTier, SearchResultItem, VideoDetail, VideoSources};
pub use crate::envelope::{Envelope, SearchPayload};
pub use crate::service::CatalogScraper;
