//! HTTP server implementation for the API

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::envelope::Envelope;
use crate::fetcher::PageFetcher;
use crate::service::CatalogScraper;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub keyword: String,
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    #[serde(default)]
    pub url: String,
}

/// Build the router around a shared scraper
pub fn router<F>(scraper: Arc<CatalogScraper<F>>) -> Router
where
    F: PageFetcher + 'static,
{
    // Browser callers fetch these endpoints cross-origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/health", get(health_handler))
        .route("/api/search", get(search_handler::<F>))
        .route("/api/detail", get(detail_handler::<F>))
        .with_state(scraper)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// Configure and start the HTTP server
pub async fn start_http_server<F>(scraper: Arc<CatalogScraper<F>>, host: &str, port: u16) -> Result<()>
where
    F: PageFetcher + 'static,
{
    let app = router(scraper);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    info!("🌐 API server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "catalog-scraper",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn search_handler<F: PageFetcher + 'static>(
    State(scraper): State<Arc<CatalogScraper<F>>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    envelope_response(scraper.search(&query.keyword).await)
}

async fn detail_handler<F: PageFetcher + 'static>(
    State(scraper): State<Arc<CatalogScraper<F>>>,
    Query(query): Query<DetailQuery>,
) -> Response {
    envelope_response(scraper.detail(&query.url).await)
}

/// Use the envelope code as the HTTP status
fn envelope_response<T: Serialize>(envelope: Envelope<T>) -> Response {
    let status = StatusCode::from_u16(envelope.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(envelope)).into_response()
}
