use crate::models::{ForexPair, IndexSpec};
use serde::{Deserialize, Serialize};

/// Persisted dashboard settings, stored as a single JSON file.
///
/// The aggregation core only ever reads these; the config endpoints own
/// all writes (whole-file replace).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub crypto: CryptoSettings,
    #[serde(default)]
    pub forex: ForexSettings,
    #[serde(default)]
    pub market: MarketSettings,
    #[serde(default)]
    pub power_saving: PowerSavingSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            crypto: CryptoSettings::default(),
            forex: ForexSettings::default(),
            market: MarketSettings::default(),
            power_saving: PowerSavingSettings::default(),
            display: DisplaySettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoSettings {
    pub enabled: bool,
    /// Number of top coins fetched per refresh
    pub coin_limit: usize,
    /// Dashboard poll interval, seconds
    pub refresh_interval: u64,
    /// Coin-id allow-list; empty means "show everything"
    #[serde(default)]
    pub tokens: Vec<String>,
}

impl CryptoSettings {
    /// A zero limit in the file means "unset"; fall back to the default.
    pub fn effective_coin_limit(&self) -> usize {
        if self.coin_limit == 0 {
            50
        } else {
            self.coin_limit
        }
    }
}

impl Default for CryptoSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            coin_limit: 50,
            refresh_interval: 60,
            tokens: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForexSettings {
    pub enabled: bool,
    #[serde(default)]
    pub pairs: Vec<ForexPair>,
}

impl Default for ForexSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            pairs: vec![
                ForexPair::new("EUR", "USD", "🇪🇺"),
                ForexPair::new("GBP", "USD", "🇬🇧"),
                ForexPair::new("USD", "JPY", "🇯🇵"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSettings {
    #[serde(default)]
    pub indices: Vec<IndexSpec>,
    #[serde(default)]
    pub stocks: Vec<IndexSpec>,
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self {
            indices: vec![
                IndexSpec::new("^GSPC", "S&P 500", "📊"),
                IndexSpec::new("^IXIC", "NASDAQ", "💻"),
                IndexSpec::new("^DJI", "Dow Jones", "🏭"),
            ],
            stocks: vec![
                IndexSpec::new("AAPL", "Apple", "🍎"),
                IndexSpec::new("NVDA", "NVIDIA", "🎮"),
                IndexSpec::new("TSLA", "Tesla", "🚗"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PowerSavingSettings {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    #[serde(default)]
    pub video_background: VideoBackgroundSettings,
}

/// Frontend-only display preferences; carried through the config CRUD
/// untouched by the aggregation core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoBackgroundSettings {
    pub enabled: bool,
    /// "auto" (sentiment-driven) or "manual"
    pub mode: String,
    pub manual_choice: String,
    pub green_video: String,
    pub neutral_video: String,
    pub red_video: String,
}

impl Default for VideoBackgroundSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: "auto".to_string(),
            manual_choice: "neutral".to_string(),
            green_video: "green.mp4".to_string(),
            neutral_video: "neutral.mp4".to_string(),
            red_video: "red.mp4".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, back);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let json = r#"{"crypto":{"enabled":false,"coinLimit":10,"refreshInterval":30,"tokens":["bitcoin"]}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert!(!settings.crypto.enabled);
        assert_eq!(settings.crypto.coin_limit, 10);
        assert_eq!(settings.crypto.tokens, vec!["bitcoin"]);
        // untouched sections come from defaults
        assert!(settings.forex.enabled);
        assert_eq!(settings.market.indices.len(), 3);
    }

    #[test]
    fn test_zero_coin_limit_falls_back_to_default() {
        let mut crypto = CryptoSettings::default();
        assert_eq!(crypto.effective_coin_limit(), 50);

        crypto.coin_limit = 10;
        assert_eq!(crypto.effective_coin_limit(), 10);

        crypto.coin_limit = 0;
        assert_eq!(crypto.effective_coin_limit(), 50);
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert!(json["crypto"]["coinLimit"].is_number());
        assert!(json["crypto"]["refreshInterval"].is_number());
        assert!(json["powerSaving"]["enabled"].is_boolean());
        assert!(json["display"]["videoBackground"]["greenVideo"].is_string());
    }
}
