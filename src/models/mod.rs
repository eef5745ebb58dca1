mod coin;
mod forex;
mod index;
mod overview;
mod sentiment;
mod settings;

pub use coin::CoinQuote;
pub use forex::{ForexPair, ForexRate};
pub use index::{percent_change, IndexQuote, IndexSpec, QuoteKind};
pub use overview::{DollarSnapshot, EquitySnapshot, MarketOverview};
pub use sentiment::{fear_greed_label, GlobalSentiment};
pub use settings::{
    CryptoSettings, DisplaySettings, ForexSettings, MarketSettings, PowerSavingSettings, Settings,
    VideoBackgroundSettings,
};
