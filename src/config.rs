use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder substituted with the encoded keyword in the search URL template
pub const KEYWORD_PLACEHOLDER: &str = "{keyword}";

/// Browser identity sent with every outbound request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_SEARCH_URL_TEMPLATE: &str = "https://www.javbangers.com/search/{keyword}/";

/// Configuration for the catalog scraper
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Outbound fetch settings
    pub fetcher: FetcherConfig,

    /// HTTP surface settings (only used with the `api` feature)
    pub server: ServerConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// User-Agent header value
    pub user_agent: String,

    /// Search results URL, must contain `{keyword}`
    pub search_url_template: String,

    /// Request timeout in seconds (None = transport default)
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter directive, overridden by RUST_LOG
    pub level: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            search_url_template: DEFAULT_SEARCH_URL_TEMPLATE.to_string(),
            timeout_seconds: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "catalog_scraper=info,warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the first config file found, falling back to env
    pub fn load() -> Result<Self> {
        let config_paths = [
            "catalog-scraper.toml",
            "config/catalog-scraper.toml",
        ];

        for path in &config_paths {
            if Path::new(path).exists() {
                match Self::load_from_path(path) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config file {}: {}", path, e),
                }
            }
        }

        Self::from_env()
    }

    /// Load configuration from an explicit TOML file, then apply env overrides
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Cannot read config {}: {}", path.display(), e))?;
        let mut config: Config = toml::from_str(&config_str)?;
        config.apply_env();
        tracing::info!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `CATALOG_SCRAPER_*` overrides. Unparseable numbers keep the prior value.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(user_agent) = lookup("CATALOG_SCRAPER_USER_AGENT") {
            self.fetcher.user_agent = user_agent;
        }

        if let Some(template) = lookup("CATALOG_SCRAPER_SEARCH_URL") {
            self.fetcher.search_url_template = template;
        }

        if let Some(timeout) = lookup("CATALOG_SCRAPER_TIMEOUT") {
            match timeout.parse() {
                Ok(seconds) => self.fetcher.timeout_seconds = Some(seconds),
                Err(_) => tracing::warn!("Ignoring invalid CATALOG_SCRAPER_TIMEOUT: {}", timeout),
            }
        }

        if let Some(port) = lookup("CATALOG_SCRAPER_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid CATALOG_SCRAPER_PORT: {}", port),
            }
        }

        if let Some(log_level) = lookup("CATALOG_SCRAPER_LOG_LEVEL") {
            self.logging.level = log_level;
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path.as_ref().display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(anyhow!("user_agent must not be empty"));
        }

        if !self.fetcher.search_url_template.contains(KEYWORD_PLACEHOLDER) {
            return Err(anyhow!(
                "search_url_template must contain the {} placeholder",
                KEYWORD_PLACEHOLDER
            ));
        }

        if self.fetcher.timeout_seconds == Some(0) {
            return Err(anyhow!("timeout_seconds must be greater than 0 when set"));
        }

        if self.server.port == 0 {
            return Err(anyhow!("port must be greater than 0"));
        }

        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "Catalog Scraper Configuration:\n\
            - Search URL: {}\n\
            - Timeout: {}\n\
            - Listen: {}:{}",
            self.fetcher.search_url_template,
            self.fetcher
                .timeout_seconds
                .map(|s| format!("{}s", s))
                .unwrap_or_else(|| "transport default".to_string()),
            self.server.host,
            self.server.port
        )
    }
}

/// Configuration builder for easy setup
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.fetcher.user_agent = user_agent.into();
        self
    }

    pub fn with_search_url_template(mut self, template: impl Into<String>) -> Self {
        self.config.fetcher.search_url_template = template.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.config.fetcher.timeout_seconds = Some(seconds);
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
