//! Dashboard API handlers
//!
//! Aggregation failures never surface as 5xx here: the worst case for any
//! market endpoint is an empty list or the neutral-default object, always
//! a renderable shape for the frontend poller.

use crate::models::{
    CoinQuote, ForexRate, GlobalSentiment, IndexQuote, MarketOverview, QuoteKind, Settings,
};
use crate::server::AppState;
use crate::services::overview::market_overview;
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{error, instrument};

/// Filtered top coins; empty when the crypto panel is disabled.
#[instrument(skip(state))]
pub async fn crypto_handler(State(state): State<AppState>) -> Json<Vec<CoinQuote>> {
    let settings = state.settings.load().await;
    if !settings.crypto.enabled {
        return Json(Vec::new());
    }

    let coins = state
        .crypto
        .filtered_coins(settings.crypto.effective_coin_limit(), &settings.crypto.tokens)
        .await;
    Json(coins)
}

#[instrument(skip(state))]
pub async fn crypto_sentiment_handler(State(state): State<AppState>) -> Json<GlobalSentiment> {
    Json(state.crypto.global_sentiment().await)
}

/// Rates for the configured pairs; empty when the forex panel is disabled.
#[instrument(skip(state))]
pub async fn forex_handler(State(state): State<AppState>) -> Json<Vec<ForexRate>> {
    let settings = state.settings.load().await;
    if !settings.forex.enabled {
        return Json(Vec::new());
    }

    Json(state.quotes.forex_rates(&settings.forex.pairs).await)
}

/// Configured indices and stocks, survivors only.
#[instrument(skip(state))]
pub async fn indices_handler(State(state): State<AppState>) -> Json<Vec<IndexQuote>> {
    let settings = state.settings.load().await;

    let specs: Vec<_> = settings
        .market
        .indices
        .iter()
        .map(|spec| (spec.clone(), QuoteKind::Index))
        .chain(
            settings
                .market
                .stocks
                .iter()
                .map(|spec| (spec.clone(), QuoteKind::Stock)),
        )
        .collect();

    Json(state.quotes.index_quotes(&specs).await)
}

#[instrument(skip(state))]
pub async fn market_overview_handler(State(state): State<AppState>) -> Json<MarketOverview> {
    Json(market_overview(&state.quotes, Utc::now()).await)
}

#[instrument(skip(state))]
pub async fn get_config_handler(State(state): State<AppState>) -> Json<Settings> {
    Json(state.settings.load().await)
}

#[derive(Debug, Serialize)]
pub struct SaveConfigResponse {
    pub success: bool,
    pub message: String,
}

/// Replace the settings file and drop cache freshness so the next
/// dashboard poll reflects the new configuration immediately.
#[instrument(skip(state, settings))]
pub async fn update_config_handler(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> (StatusCode, Json<SaveConfigResponse>) {
    match state.settings.save(&settings).await {
        Ok(()) => {
            state.crypto.invalidate().await;
            state.quotes.invalidate().await;
            (
                StatusCode::OK,
                Json(SaveConfigResponse {
                    success: true,
                    message: "Configuration saved. Reload the dashboard to see changes."
                        .to_string(),
                }),
            )
        }
        Err(err) => {
            error!("Failed to save configuration: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SaveConfigResponse {
                    success: false,
                    message: "Failed to save configuration".to_string(),
                }),
            )
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: u64,
    pub settings_path: String,
    pub caches: CacheFreshness,
}

/// Seconds since each cache slot was last refreshed; `null` for slots
/// that are empty or have been invalidated.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheFreshness {
    pub coins_age_secs: Option<u64>,
    pub sentiment_age_secs: Option<u64>,
    pub forex_age_secs: Option<u64>,
    pub indices_age_secs: Option<u64>,
    pub benchmarks_age_secs: Option<u64>,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let (coins, sentiment) = state.crypto.cache_ages().await;
    let (forex, indices, benchmarks) = state.quotes.cache_ages().await;
    let secs = |age: Option<std::time::Duration>| age.map(|d| d.as_secs());

    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.started_at.elapsed().as_secs(),
        settings_path: state.settings.path().display().to_string(),
        caches: CacheFreshness {
            coins_age_secs: secs(coins),
            sentiment_age_secs: secs(sentiment),
            forex_age_secs: secs(forex),
            indices_age_secs: secs(indices),
            benchmarks_age_secs: secs(benchmarks),
        },
    })
}
