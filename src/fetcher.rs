//! Outbound page fetching

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::{FetcherConfig, KEYWORD_PLACEHOLDER};
use crate::error::Result;

/// Source of raw HTML pages. One call is one outbound GET, no retries.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, target: &str) -> Result<String>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch(&self, target: &str) -> Result<String> {
        (**self).fetch(target).await
    }
}

/// reqwest-backed fetcher with a fixed browser identity
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a new fetcher from config
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, target: &str) -> Result<String> {
        let url = Url::parse(target)?;
        debug!("🌐 GET {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;

        debug!("📄 Downloaded {} characters of HTML content", html.len());
        Ok(html)
    }
}

/// Build the search page URL by substituting the encoded keyword into the template
pub fn search_url(template: &str, keyword: &str) -> String {
    template.replace(KEYWORD_PLACEHOLDER, &urlencoding::encode(keyword))
}
