//! HTTP surface for the two pipelines
//!
//! Exposes `GET /api/search?keyword=` and `GET /api/detail?url=`. The envelope
//! code doubles as the HTTP status.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::service::CatalogScraper;

pub mod server;

/// API Server wrapping a shared scraper
pub struct ApiServer {
    scraper: Arc<CatalogScraper>,
    host: String,
    port: u16,
}

impl ApiServer {
    /// Create a new API server from config
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            scraper: Arc::new(CatalogScraper::from_config(config)?),
            host: config.server.host.clone(),
            port: config.server.port,
        })
    }

    /// Start the API server
    pub async fn start(self) -> Result<()> {
        info!("🚀 Starting API server on {}:{}", self.host, self.port);
        server::start_http_server(self.scraper, &self.host, self.port).await
    }
}
