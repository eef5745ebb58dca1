//! Crypto aggregator
//!
//! Top-coins market data and global sentiment, each behind its own TTL
//! cache. Failures degrade to the last snapshot (coins) or to the fixed
//! neutral default (sentiment); callers always receive a renderable shape.

use crate::constants::{COINGECKO_BASE_URL, COINS_CACHE_TTL, FEAR_GREED_URL, SENTIMENT_CACHE_TTL};
use crate::error::{AppError, Result};
use crate::models::{fear_greed_label, CoinQuote, GlobalSentiment};
use crate::services::cache::{CacheOutcome, TtlCache};
use crate::services::fetch::JsonFetcher;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// CoinGecko `/coins/markets` entry
#[derive(Debug, Deserialize)]
struct MarketCoin {
    id: String,
    symbol: String,
    name: String,
    #[serde(default)]
    image: String,
    current_price: Option<f64>,
    price_change_percentage_24h: Option<f64>,
    high_24h: Option<f64>,
    low_24h: Option<f64>,
    market_cap: Option<f64>,
    total_volume: Option<f64>,
    circulating_supply: Option<f64>,
    sparkline_in_7d: Option<Sparkline>,
    last_updated: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Sparkline {
    #[serde(default)]
    price: Vec<f64>,
}

impl From<MarketCoin> for CoinQuote {
    fn from(coin: MarketCoin) -> Self {
        Self {
            id: coin.id,
            symbol: coin.symbol.to_uppercase(),
            name: coin.name,
            image: coin.image,
            current_price: coin.current_price.unwrap_or(0.0),
            price_change_24h: coin.price_change_percentage_24h.unwrap_or(0.0),
            high_24h: coin.high_24h.unwrap_or(0.0),
            low_24h: coin.low_24h.unwrap_or(0.0),
            market_cap: coin.market_cap.unwrap_or(0.0),
            volume_24h: coin.total_volume.unwrap_or(0.0),
            circulating_supply: coin.circulating_supply.unwrap_or(0.0),
            sparkline: coin.sparkline_in_7d.map(|s| s.price).unwrap_or_default(),
            last_updated: coin.last_updated.unwrap_or_default(),
        }
    }
}

/// CoinGecko `/global` payload
#[derive(Debug, Deserialize)]
struct GlobalResponse {
    data: GlobalData,
}

#[derive(Debug, Deserialize)]
struct GlobalData {
    #[serde(default)]
    market_cap_percentage: HashMap<String, f64>,
    #[serde(default)]
    total_market_cap: HashMap<String, f64>,
    #[serde(default)]
    total_volume: HashMap<String, f64>,
}

/// alternative.me `/fng/` payload; the score arrives as a JSON string
#[derive(Debug, Deserialize)]
struct FearGreedResponse {
    data: Vec<FearGreedEntry>,
}

#[derive(Debug, Deserialize)]
struct FearGreedEntry {
    value: String,
}

pub struct CryptoService {
    fetcher: Arc<dyn JsonFetcher>,
    coins_cache: TtlCache<usize, Vec<CoinQuote>>,
    sentiment_cache: TtlCache<(), GlobalSentiment>,
}

impl CryptoService {
    pub fn new(fetcher: Arc<dyn JsonFetcher>) -> Self {
        Self {
            fetcher,
            coins_cache: TtlCache::new(COINS_CACHE_TTL),
            sentiment_cache: TtlCache::new(SENTIMENT_CACHE_TTL),
        }
    }

    /// Top `limit` coins by market cap, sparkline included.
    ///
    /// Served from cache within the TTL window; on refresh failure the last
    /// snapshot is returned, or an empty list when none exists yet.
    pub async fn top_coins(&self, limit: usize) -> Vec<CoinQuote> {
        let fetcher = Arc::clone(&self.fetcher);
        let outcome = self
            .coins_cache
            .get_with(limit, || async move {
                let url = format!(
                    "{}/coins/markets?vs_currency=usd&order=market_cap_desc&per_page={}&page=1&sparkline=true&price_change_percentage=24h",
                    COINGECKO_BASE_URL, limit
                );
                let body = fetcher.fetch_json(&url).await?;
                let markets: Vec<MarketCoin> = serde_json::from_value(body)?;
                Ok(markets.into_iter().map(CoinQuote::from).collect())
            })
            .await;

        match outcome {
            CacheOutcome::Fresh(coins) | CacheOutcome::Refreshed(coins) => (*coins).clone(),
            CacheOutcome::Stale(coins, err) => {
                warn!("Coin refresh failed, serving stale snapshot: {}", err);
                (*coins).clone()
            }
            CacheOutcome::Unavailable(err) => {
                warn!("Coin fetch failed with empty cache: {}", err);
                Vec::new()
            }
        }
    }

    /// Top coins narrowed to the configured allow-list.
    pub async fn filtered_coins(&self, limit: usize, allow_list: &[String]) -> Vec<CoinQuote> {
        filter_by_allow_list(self.top_coins(limit).await, allow_list)
    }

    /// Aggregate market metrics plus the Fear & Greed score.
    ///
    /// The two upstreams are queried concurrently; if either fails the
    /// fixed neutral default is returned, never a cached partial.
    pub async fn global_sentiment(&self) -> GlobalSentiment {
        let fetcher = Arc::clone(&self.fetcher);
        let outcome = self
            .sentiment_cache
            .get_with((), || async move { fetch_sentiment(fetcher.as_ref()).await })
            .await;

        match outcome {
            CacheOutcome::Fresh(sentiment) | CacheOutcome::Refreshed(sentiment) => {
                (*sentiment).clone()
            }
            CacheOutcome::Stale(_, err) | CacheOutcome::Unavailable(err) => {
                warn!("Sentiment fetch failed, serving neutral default: {}", err);
                GlobalSentiment::default()
            }
        }
    }

    /// Drop freshness on both data classes; the next reads refetch.
    pub async fn invalidate(&self) {
        self.coins_cache.invalidate().await;
        self.sentiment_cache.invalidate().await;
    }

    /// Snapshot ages (coins, sentiment) for the health endpoint.
    pub async fn cache_ages(&self) -> (Option<Duration>, Option<Duration>) {
        (
            self.coins_cache.age().await,
            self.sentiment_cache.age().await,
        )
    }
}

async fn fetch_sentiment(fetcher: &dyn JsonFetcher) -> Result<GlobalSentiment> {
    let global_url = format!("{}/global", COINGECKO_BASE_URL);
    let (global_body, fng_body) = tokio::try_join!(
        fetcher.fetch_json(&global_url),
        fetcher.fetch_json(FEAR_GREED_URL)
    )?;

    let global: GlobalResponse = serde_json::from_value(global_body)?;
    let fng: FearGreedResponse = serde_json::from_value(fng_body)?;

    let entry = fng
        .data
        .first()
        .ok_or_else(|| AppError::Parse("Empty fear/greed data".to_string()))?;
    let score: u32 = entry
        .value
        .trim()
        .parse()
        .map_err(|_| AppError::Parse(format!("Non-numeric fear/greed value: {}", entry.value)))?;

    Ok(GlobalSentiment {
        fear_greed_index: score,
        fear_greed_text: fear_greed_label(score).to_string(),
        btc_dominance: global
            .data
            .market_cap_percentage
            .get("btc")
            .copied()
            .unwrap_or(0.0),
        total_market_cap: global.data.total_market_cap.get("usd").copied().unwrap_or(0.0),
        total_volume: global.data.total_volume.get("usd").copied().unwrap_or(0.0),
    })
}

/// Intersection by coin id in fetch order; an empty allow-list means no
/// filtering at all.
pub fn filter_by_allow_list(coins: Vec<CoinQuote>, allow_list: &[String]) -> Vec<CoinQuote> {
    if allow_list.is_empty() {
        return coins;
    }
    coins
        .into_iter()
        .filter(|coin| allow_list.iter().any(|id| *id == coin.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{Canned, CannedFetcher};
    use serde_json::json;
    use std::time::Duration;

    fn market_entry(id: &str, symbol: &str, price: f64) -> serde_json::Value {
        json!({
            "id": id,
            "symbol": symbol,
            "name": symbol.to_uppercase(),
            "image": format!("https://img.test/{}.png", id),
            "current_price": price,
            "price_change_percentage_24h": 2.5,
            "high_24h": price * 1.05,
            "low_24h": price * 0.95,
            "market_cap": price * 1.0e7,
            "total_volume": price * 1.0e5,
            "circulating_supply": 1.0e7,
            "sparkline_in_7d": { "price": [price * 0.98, price] },
            "last_updated": "2025-06-01T00:00:00Z"
        })
    }

    fn service_with_markets(coins: serde_json::Value) -> (Arc<CannedFetcher>, CryptoService) {
        let fetcher = Arc::new(CannedFetcher::new().with_route("/coins/markets", Canned::Json(coins)));
        let service = CryptoService::new(fetcher.clone());
        (fetcher, service)
    }

    #[tokio::test(start_paused = true)]
    async fn test_top_coins_cached_within_ttl() {
        let (fetcher, service) =
            service_with_markets(json!([market_entry("bitcoin", "btc", 64000.0)]));

        let first = service.top_coins(50).await;
        let second = service.top_coins(50).await;

        assert_eq!(first.len(), 1);
        assert_eq!(first[0].symbol, "BTC");
        assert_eq!(first, second);
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_top_coins_stale_fallback_after_outage() {
        let (fetcher, service) =
            service_with_markets(json!([market_entry("bitcoin", "btc", 64000.0)]));

        let before = service.top_coins(50).await;
        tokio::time::advance(Duration::from_secs(16)).await;
        fetcher.route("/coins/markets", Canned::Network);

        let after = service.top_coins(50).await;
        assert_eq!(before, after);
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_top_coins_empty_on_cold_outage() {
        let fetcher = Arc::new(CannedFetcher::new().with_route("/coins/markets", Canned::Network));
        let service = CryptoService::new(fetcher);
        assert!(service.top_coins(50).await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_top_coins_rejects_malformed_payload() {
        let (_, service) = service_with_markets(json!({"unexpected": "shape"}));
        // decode failure with a cold cache degrades to an empty list
        assert!(service.top_coins(50).await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sentiment_success_path() {
        let fetcher = Arc::new(
            CannedFetcher::new()
                .with_route(
                    "/global",
                    Canned::Json(json!({
                        "data": {
                            "market_cap_percentage": { "btc": 54.2, "eth": 17.0 },
                            "total_market_cap": { "usd": 2.4e12 },
                            "total_volume": { "usd": 9.8e10 }
                        }
                    })),
                )
                .with_route("alternative.me", Canned::Json(json!({ "data": [{ "value": "72" }] }))),
        );
        let service = CryptoService::new(fetcher);

        let sentiment = service.global_sentiment().await;
        assert_eq!(sentiment.fear_greed_index, 72);
        assert_eq!(sentiment.fear_greed_text, "Greed");
        assert_eq!(sentiment.btc_dominance, 54.2);
        assert_eq!(sentiment.total_market_cap, 2.4e12);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sentiment_total_outage_returns_exact_default() {
        let fetcher = Arc::new(
            CannedFetcher::new()
                .with_route("/global", Canned::Network)
                .with_route("alternative.me", Canned::Network),
        );
        let service = CryptoService::new(fetcher);

        assert_eq!(service.global_sentiment().await, GlobalSentiment::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sentiment_single_upstream_failure_is_not_partial() {
        let fetcher = Arc::new(
            CannedFetcher::new()
                .with_route(
                    "/global",
                    Canned::Json(json!({
                        "data": {
                            "market_cap_percentage": { "btc": 54.2 },
                            "total_market_cap": { "usd": 2.4e12 },
                            "total_volume": { "usd": 9.8e10 }
                        }
                    })),
                )
                .with_route("alternative.me", Canned::Status(503)),
        );
        let service = CryptoService::new(fetcher);

        assert_eq!(service.global_sentiment().await, GlobalSentiment::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_ages_report_per_class_freshness() {
        let (_, service) = service_with_markets(json!([market_entry("bitcoin", "btc", 64000.0)]));
        assert_eq!(service.cache_ages().await, (None, None));

        service.top_coins(50).await;
        tokio::time::advance(Duration::from_secs(4)).await;

        // only the coins slot has a snapshot; sentiment was never fetched
        let (coins_age, sentiment_age) = service.cache_ages().await;
        assert_eq!(coins_age, Some(Duration::from_secs(4)));
        assert_eq!(sentiment_age, None);

        service.invalidate().await;
        assert_eq!(service.cache_ages().await, (None, None));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_forces_refetch() {
        let (fetcher, service) =
            service_with_markets(json!([market_entry("bitcoin", "btc", 64000.0)]));

        service.top_coins(50).await;
        service.invalidate().await;
        service.top_coins(50).await;

        assert_eq!(fetcher.calls(), 2);
    }

    fn sample_coins() -> Vec<CoinQuote> {
        ["bitcoin", "ethereum", "solana"]
            .iter()
            .enumerate()
            .map(|(i, id)| CoinQuote {
                id: id.to_string(),
                symbol: id[..3].to_uppercase(),
                name: id.to_string(),
                image: String::new(),
                current_price: 100.0 * (i + 1) as f64,
                price_change_24h: 0.0,
                high_24h: 0.0,
                low_24h: 0.0,
                market_cap: 0.0,
                volume_24h: 0.0,
                circulating_supply: 0.0,
                sparkline: Vec::new(),
                last_updated: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_empty_allow_list_returns_input_unchanged() {
        let coins = sample_coins();
        assert_eq!(filter_by_allow_list(coins.clone(), &[]), coins);
    }

    #[test]
    fn test_filter_preserves_fetch_order() {
        let coins = sample_coins();
        let allow = vec!["solana".to_string(), "bitcoin".to_string()];
        let filtered = filter_by_allow_list(coins, &allow);
        let ids: Vec<&str> = filtered.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["bitcoin", "solana"]);
    }

    #[test]
    fn test_filter_drops_unknown_ids() {
        let filtered = filter_by_allow_list(sample_coins(), &["dogecoin".to_string()]);
        assert!(filtered.is_empty());
    }
}
