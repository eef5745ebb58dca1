use serde::{Deserialize, Serialize};

/// Equity side of the market overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquitySnapshot {
    pub name: String,
    /// Benchmark percent change (0 when the quote is unavailable)
    pub change: f64,
    pub trend: String,
    pub session: String,
}

/// Dollar side of the market overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DollarSnapshot {
    pub name: String,
    pub change: f64,
    pub strength: String,
    pub session: String,
}

/// Composite market snapshot derived from the benchmark quotes and the
/// current UTC time. Recomputed fresh on every request, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOverview {
    pub stocks: EquitySnapshot,
    pub forex: DollarSnapshot,
    /// "Risk On" / "Risk Off" / "Neutral"
    pub sentiment: String,
    /// "High Vol" / "Low Vol" / "Normal Vol"
    pub volatility: String,
    pub market_direction: String,
}
