use anyhow::Result;
use catalog_scraper::{CatalogScraper, Config};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "catalog-scraper")]
#[command(version, about = "Search a video catalog and extract video details")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog for a keyword
    Search {
        keyword: String,
    },
    /// Extract details from a video page URL
    Detail {
        url: String,
        /// Print only the highest-quality source URL
        #[arg(long)]
        best: bool,
    },
    /// Write the effective configuration to a TOML file
    InitConfig {
        #[arg(default_value = "catalog-scraper.toml")]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Serve the search and detail endpoints over HTTP
    #[cfg(feature = "api")]
    Serve {
        /// Override the configured listening port
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load().unwrap_or_else(|e| {
            eprintln!("Failed to load config, using defaults: {}", e);
            Config::default()
        }),
    };

    // Initialize logging
    let directive = if cli.verbose {
        "catalog_scraper=debug,info".to_string()
    } else {
        config.logging.level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)))
        .with_writer(std::io::stderr)
        .init();

    config.validate()?;

    match cli.command {
        Commands::Search { keyword } => {
            let scraper = CatalogScraper::from_config(&config)?;
            let envelope = scraper.search(&keyword).await;
            print_json(&envelope)?;
            exit_for(envelope.code());
        }
        Commands::Detail { url, best } => {
            let scraper = CatalogScraper::from_config(&config)?;
            let envelope = scraper.detail(&url).await;

            match envelope.payload().filter(|_| best) {
                Some(detail) => match detail.video_sources.best() {
                    Some((tier, source)) => {
                        info!("Best available quality: {}", tier.description());
                        println!("{}", source);
                    }
                    None => {
                        warn!("No video source found on {}", url);
                        std::process::exit(1);
                    }
                },
                None => print_json(&envelope)?,
            }
            exit_for(envelope.code());
        }
        Commands::InitConfig { path, force } => {
            if path.exists() && !force {
                anyhow::bail!("{} already exists, pass --force to overwrite", path.display());
            }
            config.save(&path)?;
        }
        #[cfg(feature = "api")]
        Commands::Serve { port } => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            info!("{}", config.summary());
            catalog_scraper::api::ApiServer::new(&config)?.start().await?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn exit_for(code: u16) {
    if code != 200 {
        std::process::exit(1);
    }
}
