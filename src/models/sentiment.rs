use serde::{Deserialize, Serialize};

/// Aggregate crypto market sentiment.
///
/// `default()` is the documented degraded shape returned whenever either
/// sentiment upstream is unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSentiment {
    /// Fear & Greed composite score, 0-100
    pub fear_greed_index: u32,
    pub fear_greed_text: String,
    /// BTC share of total market cap, percent
    pub btc_dominance: f64,
    /// Total crypto market cap, USD
    pub total_market_cap: f64,
    /// Total 24h volume, USD
    pub total_volume: f64,
}

impl Default for GlobalSentiment {
    fn default() -> Self {
        Self {
            fear_greed_index: 50,
            fear_greed_text: "Neutral".to_string(),
            btc_dominance: 50.0,
            total_market_cap: 0.0,
            total_volume: 0.0,
        }
    }
}

/// Map a 0-100 Fear & Greed score to its bucket label.
///
/// Buckets are evaluated low-to-high; boundary scores land in the upper
/// bucket (40 is "Neutral", not "Fear").
pub fn fear_greed_label(value: u32) -> &'static str {
    if value < 25 {
        "Extreme Fear"
    } else if value < 40 {
        "Fear"
    } else if value < 60 {
        "Neutral"
    } else if value < 75 {
        "Greed"
    } else {
        "Extreme Greed"
    }
}
