//! Market overview synthesizer
//!
//! Combines the equity benchmark, dollar index and volatility index with
//! UTC session logic into one sentiment snapshot. The synthesis itself is
//! a pure function over three optional quotes and a timestamp; every
//! missing quote degrades its derived fields to a neutral default.

use crate::constants::{
    OVERVIEW_DOLLAR_SYMBOL, OVERVIEW_EQUITY_SYMBOL, OVERVIEW_VOLATILITY_SYMBOL,
};
use crate::models::{
    DollarSnapshot, EquitySnapshot, IndexQuote, IndexSpec, MarketOverview, QuoteKind,
};
use crate::services::quotes::QuoteService;
use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};

/// Fetch the three benchmarks concurrently and synthesize a fresh
/// overview. The composite is never cached; only the underlying quotes
/// pass through the quote aggregator's short snapshot window.
pub async fn market_overview(quotes: &QuoteService, now: DateTime<Utc>) -> MarketOverview {
    let specs = vec![
        (
            IndexSpec::new(OVERVIEW_EQUITY_SYMBOL, "S&P 500", "📊"),
            QuoteKind::Index,
        ),
        (
            IndexSpec::new(OVERVIEW_DOLLAR_SYMBOL, "DXY", "💱"),
            QuoteKind::Index,
        ),
        (
            IndexSpec::new(OVERVIEW_VOLATILITY_SYMBOL, "VIX", "📈"),
            QuoteKind::Index,
        ),
    ];
    let fetched = quotes.benchmark_quotes(&specs).await;
    let find = |symbol: &str| fetched.iter().find(|q| q.symbol == symbol);

    synthesize(
        find(OVERVIEW_EQUITY_SYMBOL),
        find(OVERVIEW_DOLLAR_SYMBOL),
        find(OVERVIEW_VOLATILITY_SYMBOL),
        now,
    )
}

/// Derive the overview from whatever benchmark quotes resolved.
pub fn synthesize(
    sp500: Option<&IndexQuote>,
    dxy: Option<&IndexQuote>,
    vix: Option<&IndexQuote>,
    now: DateTime<Utc>,
) -> MarketOverview {
    let equity_change = sp500.map(|q| q.change).unwrap_or(0.0);
    let dollar_change = dxy.map(|q| q.change).unwrap_or(0.0);

    let trend = if equity_change > 0.3 {
        "Trending Up"
    } else if equity_change < -0.3 {
        "Trending Down"
    } else {
        "Neutral"
    };

    let strength = if dollar_change > 0.5 {
        "Strong"
    } else if dollar_change < -0.5 {
        "Weak"
    } else {
        "Moderate"
    };

    let sentiment = if equity_change > 0.5 {
        "Risk On"
    } else if equity_change < -0.5 {
        "Risk Off"
    } else {
        "Neutral"
    };

    // volatility buckets on the VIX level itself, not its change
    let volatility = match vix {
        Some(q) if q.price > 20.0 => "High Vol",
        Some(q) if q.price < 12.0 => "Low Vol",
        _ => "Normal Vol",
    };

    let market_direction = if equity_change > 1.0 {
        "Strong Rally"
    } else if equity_change > 0.3 {
        "Bullish"
    } else if equity_change < -1.0 {
        "Sell-Off"
    } else if equity_change < -0.3 {
        "Bearish"
    } else {
        "Stable"
    };

    MarketOverview {
        stocks: EquitySnapshot {
            name: "S&P 500".to_string(),
            change: equity_change,
            trend: trend.to_string(),
            session: equity_session(now).to_string(),
        },
        forex: DollarSnapshot {
            name: "DXY".to_string(),
            change: dollar_change,
            strength: strength.to_string(),
            session: fx_session(now).to_string(),
        },
        sentiment: sentiment.to_string(),
        volatility: volatility.to_string(),
        market_direction: market_direction.to_string(),
    }
}

/// US equity cash session by UTC hour (9:30-16:00 EST ≈ 14-21 UTC).
pub fn equity_session(now: DateTime<Utc>) -> &'static str {
    let hour = now.hour();
    if (14..21).contains(&hour) {
        "US Open"
    } else {
        "US Closed"
    }
}

/// Most active FX session by UTC hour; the market closes on weekends.
pub fn fx_session(now: DateTime<Utc>) -> &'static str {
    match now.weekday() {
        Weekday::Sat | Weekday::Sun => return "Weekend",
        _ => {}
    }

    let hour = now.hour();
    if hour < 7 {
        "Sydney/Tokyo"
    } else if hour < 15 {
        "London"
    } else if hour < 22 {
        "New York"
    } else {
        "Sydney Open"
    }
}
