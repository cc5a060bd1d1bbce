//! Search and detail pipelines: fetch, parse, extract, wrap

use tracing::{info, warn};

use crate::catalog::{extract_detail, extract_list, SearchResultItem, VideoDetail};
use crate::config::Config;
use crate::document::Document;
use crate::envelope::{Envelope, SearchPayload};
use crate::error::{Result, ScrapeError};
use crate::fetcher::{search_url, HttpFetcher, PageFetcher};

pub const EMPTY_KEYWORD_MESSAGE: &str = "keyword must not be empty";
pub const EMPTY_URL_MESSAGE: &str = "url must not be empty";
pub const NO_RESULTS_MESSAGE: &str = "no results for that keyword";

/// Entry point for both pipelines. Holds no per-request state, so one
/// instance can serve concurrent calls.
#[derive(Clone)]
pub struct CatalogScraper<F = HttpFetcher> {
    fetcher: F,
    search_url_template: String,
}

impl CatalogScraper<HttpFetcher> {
    /// Create a scraper backed by a real HTTP client
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            HttpFetcher::new(&config.fetcher)?,
            config.fetcher.search_url_template.clone(),
        ))
    }
}

impl<F: PageFetcher> CatalogScraper<F> {
    pub fn new(fetcher: F, search_url_template: impl Into<String>) -> Self {
        Self {
            fetcher,
            search_url_template: search_url_template.into(),
        }
    }

    /// Search the catalog for `keyword` and wrap the outcome
    pub async fn search(&self, keyword: &str) -> Envelope<SearchPayload> {
        Envelope::from_result(self.try_search(keyword).await.map(|results| SearchPayload { results }))
    }

    /// Scrape a single video page and wrap the outcome
    pub async fn detail(&self, url: &str) -> Envelope<VideoDetail> {
        Envelope::from_result(self.try_detail(url).await)
    }

    /// Search pipeline without the envelope. Zero results is `NotFound`.
    pub async fn try_search(&self, keyword: &str) -> Result<Vec<SearchResultItem>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(ScrapeError::Validation(EMPTY_KEYWORD_MESSAGE.to_string()));
        }

        let target = search_url(&self.search_url_template, keyword);
        info!("🔍 Searching catalog for '{}'", keyword);

        let html = self.fetcher.fetch(&target).await?;
        let results = parse_results(&html)?;

        if results.is_empty() {
            info!("No results for '{}'", keyword);
            return Err(ScrapeError::NotFound(NO_RESULTS_MESSAGE.to_string()));
        }

        info!("✅ Found {} results for '{}'", results.len(), keyword);
        Ok(results)
    }

    /// Detail pipeline without the envelope. A blank record is still success.
    pub async fn try_detail(&self, url: &str) -> Result<VideoDetail> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ScrapeError::Validation(EMPTY_URL_MESSAGE.to_string()));
        }

        info!("📄 Fetching video page: {}", url);
        let html = self.fetcher.fetch(url).await?;
        let detail = parse_detail(&html)?;

        if detail.is_blank() {
            warn!("Video page {} produced no metadata, markup may have changed", url);
        }

        Ok(detail)
    }
}

fn parse_results(html: &str) -> Result<Vec<SearchResultItem>> {
    extract_list(&Document::parse(html))
}

fn parse_detail(html: &str) -> Result<VideoDetail> {
    extract_detail(&Document::parse(html), html)
}
