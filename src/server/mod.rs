pub mod api;

use crate::services::{CryptoService, QuoteService, SettingsStore};
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub crypto: Arc<CryptoService>,
    pub quotes: Arc<QuoteService>,
    pub settings: Arc<SettingsStore>,
    pub started_at: Instant,
}

/// Start the axum server
pub async fn serve(
    app_state: AppState,
    port: u16,
    public_dir: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    // Self-hosted LAN dashboard; keep CORS permissive
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers(Any);

    tracing::info!("Registering routes:");
    tracing::info!("  GET  /api/crypto");
    tracing::info!("  GET  /api/crypto-sentiment");
    tracing::info!("  GET  /api/forex");
    tracing::info!("  GET  /api/indices");
    tracing::info!("  GET  /api/market-overview");
    tracing::info!("  GET  /api/config  POST /api/config");
    tracing::info!("  GET  /health");
    tracing::info!("  static files from {}", public_dir.display());

    let app = Router::new()
        .route("/api/crypto", get(api::crypto_handler))
        .route("/api/crypto-sentiment", get(api::crypto_sentiment_handler))
        .route("/api/forex", get(api::forex_handler))
        .route("/api/indices", get(api::indices_handler))
        .route("/api/market-overview", get(api::market_overview_handler))
        .route(
            "/api/config",
            get(api::get_config_handler).post(api::update_config_handler),
        )
        .route("/health", get(api::health_handler))
        .fallback_service(ServeDir::new(public_dir))
        .layer(cors)
        .with_state(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
