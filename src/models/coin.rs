use serde::{Deserialize, Serialize};

/// Market snapshot for a single coin, as served to the dashboard.
///
/// Immutable once constructed; the crypto aggregator replaces the whole
/// list on each successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinQuote {
    /// Upstream coin id (e.g. "bitcoin"), also the filter key
    pub id: String,
    /// Ticker symbol, uppercased (e.g. "BTC")
    pub symbol: String,
    pub name: String,
    /// URL of the coin logo
    pub image: String,
    pub current_price: f64,
    /// 24h price change in percent
    pub price_change_24h: f64,
    pub high_24h: f64,
    pub low_24h: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub circulating_supply: f64,
    /// 7-day price samples, most recent last
    pub sparkline: Vec<f64>,
    /// Upstream timestamp of the quote (RFC 3339)
    pub last_updated: String,
}
