use serde::{Deserialize, Serialize};

/// A configured currency pair to quote (from settings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForexPair {
    /// Base currency code (e.g. "EUR")
    pub from: String,
    /// Quote currency code (e.g. "USD")
    pub to: String,
    /// Flag glyph shown next to the pair
    #[serde(default = "default_flag")]
    pub flag: String,
}

fn default_flag() -> String {
    "💵".to_string()
}

impl ForexPair {
    pub fn new(from: &str, to: &str, flag: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            flag: flag.to_string(),
        }
    }

    /// Display label, e.g. "EUR/USD"
    pub fn label(&self) -> String {
        format!("{}/{}", self.from, self.to)
    }
}

/// A resolved exchange rate for one configured pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForexRate {
    /// Pair label, e.g. "EUR/USD"
    pub pair: String,
    /// Positive exchange rate (units of `to` per one `from`)
    pub rate: f64,
    pub from: String,
    pub to: String,
    pub flag: String,
}
