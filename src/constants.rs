//! Upstream endpoints and cache tuning
//!
//! All third-party base URLs and TTL windows live here so the aggregators
//! stay free of magic strings.

use std::time::Duration;

/// Base URL for CoinGecko (coin markets and global metrics)
pub const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Fear & Greed index endpoint (alternative.me)
pub const FEAR_GREED_URL: &str = "https://api.alternative.me/fng/?limit=1";

/// Base URL for exchangerate-api (forex rates, keyed by base currency)
pub const EXCHANGE_RATE_BASE_URL: &str = "https://api.exchangerate-api.com/v4/latest";

/// Base URL for Yahoo Finance chart quotes (indices and stocks)
pub const YAHOO_CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Per-request upstream timeout; a timed-out call is treated as a network failure
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// TTL for the top-coins snapshot
pub const COINS_CACHE_TTL: Duration = Duration::from_secs(15);

/// TTL for the global sentiment snapshot
pub const SENTIMENT_CACHE_TTL: Duration = Duration::from_secs(60);

/// TTL for forex and index batch snapshots
pub const QUOTES_CACHE_TTL: Duration = Duration::from_secs(15);

/// Benchmark symbols driving the market overview
pub const OVERVIEW_EQUITY_SYMBOL: &str = "^GSPC";
pub const OVERVIEW_DOLLAR_SYMBOL: &str = "DX-Y.NYB";
pub const OVERVIEW_VOLATILITY_SYMBOL: &str = "^VIX";
