//! Forex and index/stock quote aggregator
//!
//! Batches of independent per-item fetches run concurrently; one item's
//! failure never blocks its siblings, and survivors keep input order.
//! Each batch result is a short-lived snapshot keyed by the requested
//! spec list, so settings edits bypass stale snapshots immediately.

use crate::constants::{EXCHANGE_RATE_BASE_URL, QUOTES_CACHE_TTL, YAHOO_CHART_BASE_URL};
use crate::error::{AppError, Result};
use crate::models::{percent_change, ForexPair, ForexRate, IndexQuote, IndexSpec, QuoteKind};
use crate::services::cache::{CacheOutcome, TtlCache};
use crate::services::fetch::JsonFetcher;
use futures::future::join_all;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// exchangerate-api `/latest/{base}` payload
#[derive(Debug, Deserialize)]
struct ExchangeRateResponse {
    rates: HashMap<String, f64>,
}

/// Yahoo Finance chart payload, down to the meta block we read
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartPayload,
}

#[derive(Debug, Deserialize)]
struct ChartPayload {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<f64>,
    chart_previous_close: Option<f64>,
    previous_close: Option<f64>,
}

pub struct QuoteService {
    fetcher: Arc<dyn JsonFetcher>,
    forex_cache: TtlCache<Vec<ForexPair>, Vec<ForexRate>>,
    index_cache: TtlCache<Vec<(IndexSpec, QuoteKind)>, Vec<IndexQuote>>,
    // The overview's benchmark symbols get their own slot; sharing one
    // with the configured indices would evict whichever batch polled last.
    benchmark_cache: TtlCache<Vec<(IndexSpec, QuoteKind)>, Vec<IndexQuote>>,
}

impl QuoteService {
    pub fn new(fetcher: Arc<dyn JsonFetcher>) -> Self {
        Self {
            fetcher,
            forex_cache: TtlCache::new(QUOTES_CACHE_TTL),
            index_cache: TtlCache::new(QUOTES_CACHE_TTL),
            benchmark_cache: TtlCache::new(QUOTES_CACHE_TTL),
        }
    }

    /// Rates for the configured pairs, fetched concurrently per pair.
    ///
    /// A failed pair is dropped from the batch; survivors keep the input
    /// order. A batch where every pair failed counts as a refresh failure
    /// so the previous snapshot backs the response.
    pub async fn forex_rates(&self, pairs: &[ForexPair]) -> Vec<ForexRate> {
        let fetcher = Arc::clone(&self.fetcher);
        let requested = pairs.to_vec();
        let outcome = self
            .forex_cache
            .get_with(pairs.to_vec(), || async move {
                let results =
                    join_all(requested.iter().map(|p| fetch_pair(fetcher.as_ref(), p))).await;

                let mut rates = Vec::new();
                for (pair, result) in requested.iter().zip(results) {
                    match result {
                        Ok(rate) => rates.push(rate),
                        Err(err) => warn!("Forex fetch failed for {}: {}", pair.label(), err),
                    }
                }

                if rates.is_empty() && !requested.is_empty() {
                    return Err(AppError::Network("All forex pair fetches failed".to_string()));
                }
                Ok(rates)
            })
            .await;

        unwrap_batch(outcome, "forex")
    }

    /// Latest price and percent change vs. previous close for each
    /// configured index or stock. Failed symbols are absent, never zeroed.
    pub async fn index_quotes(&self, specs: &[(IndexSpec, QuoteKind)]) -> Vec<IndexQuote> {
        let outcome = self
            .index_cache
            .get_with(specs.to_vec(), || {
                fetch_symbol_batch(Arc::clone(&self.fetcher), specs.to_vec())
            })
            .await;

        unwrap_batch(outcome, "index")
    }

    /// Same contract as [`index_quotes`](Self::index_quotes), served from
    /// the dedicated benchmark slot so the overview's fixed symbols and
    /// the configured indices never evict each other's snapshots.
    pub async fn benchmark_quotes(&self, specs: &[(IndexSpec, QuoteKind)]) -> Vec<IndexQuote> {
        let outcome = self
            .benchmark_cache
            .get_with(specs.to_vec(), || {
                fetch_symbol_batch(Arc::clone(&self.fetcher), specs.to_vec())
            })
            .await;

        unwrap_batch(outcome, "benchmark")
    }

    /// Drop freshness on every snapshot; the next reads refetch.
    pub async fn invalidate(&self) {
        self.forex_cache.invalidate().await;
        self.index_cache.invalidate().await;
        self.benchmark_cache.invalidate().await;
    }

    /// Snapshot ages (forex, index, benchmark) for the health endpoint.
    pub async fn cache_ages(&self) -> (Option<Duration>, Option<Duration>, Option<Duration>) {
        (
            self.forex_cache.age().await,
            self.index_cache.age().await,
            self.benchmark_cache.age().await,
        )
    }
}

async fn fetch_symbol_batch(
    fetcher: Arc<dyn JsonFetcher>,
    requested: Vec<(IndexSpec, QuoteKind)>,
) -> Result<Vec<IndexQuote>> {
    let results = join_all(
        requested
            .iter()
            .map(|(spec, kind)| fetch_symbol(fetcher.as_ref(), spec, *kind)),
    )
    .await;

    let mut quotes = Vec::new();
    for ((spec, _), result) in requested.iter().zip(results) {
        match result {
            Ok(quote) => quotes.push(quote),
            Err(err) => warn!("Quote fetch failed for {}: {}", spec.symbol, err),
        }
    }

    if quotes.is_empty() && !requested.is_empty() {
        return Err(AppError::Network("All symbol fetches failed".to_string()));
    }
    Ok(quotes)
}

fn unwrap_batch<T: Clone>(outcome: CacheOutcome<Vec<T>>, class: &str) -> Vec<T> {
    match outcome {
        CacheOutcome::Fresh(items) | CacheOutcome::Refreshed(items) => (*items).clone(),
        CacheOutcome::Stale(items, err) => {
            warn!("{} refresh failed, serving stale snapshot: {}", class, err);
            (*items).clone()
        }
        CacheOutcome::Unavailable(err) => {
            warn!("{} batch failed with empty cache: {}", class, err);
            Vec::new()
        }
    }
}

async fn fetch_pair(fetcher: &dyn JsonFetcher, pair: &ForexPair) -> Result<ForexRate> {
    let url = format!("{}/{}", EXCHANGE_RATE_BASE_URL, pair.from);
    let body = fetcher.fetch_json(&url).await?;
    let parsed: ExchangeRateResponse = serde_json::from_value(body)?;

    let rate = parsed.rates.get(&pair.to).copied().ok_or_else(|| {
        AppError::Parse(format!("No {} rate in {} table", pair.to, pair.from))
    })?;

    Ok(ForexRate {
        pair: pair.label(),
        rate,
        from: pair.from.clone(),
        to: pair.to.clone(),
        flag: pair.flag.clone(),
    })
}

async fn fetch_symbol(
    fetcher: &dyn JsonFetcher,
    spec: &IndexSpec,
    kind: QuoteKind,
) -> Result<IndexQuote> {
    let url = format!(
        "{}/{}?interval=1d&range=1d",
        YAHOO_CHART_BASE_URL,
        encode_symbol(&spec.symbol)
    );
    let body = fetcher.fetch_json(&url).await?;
    let parsed: ChartResponse = serde_json::from_value(body)?;

    let meta = parsed
        .chart
        .result
        .and_then(|mut results| {
            if results.is_empty() {
                None
            } else {
                Some(results.remove(0).meta)
            }
        })
        .ok_or_else(|| AppError::Parse(format!("Empty chart result for {}", spec.symbol)))?;

    let price = meta
        .regular_market_price
        .ok_or_else(|| AppError::Parse(format!("No market price for {}", spec.symbol)))?;
    let previous_close = meta
        .chart_previous_close
        .or(meta.previous_close)
        .ok_or_else(|| AppError::Parse(format!("No previous close for {}", spec.symbol)))?;
    let change = percent_change(price, previous_close)
        .ok_or_else(|| AppError::Parse(format!("Unusable previous close for {}", spec.symbol)))?;

    Ok(IndexQuote {
        symbol: spec.symbol.clone(),
        name: spec.name.clone(),
        icon: spec.icon.clone(),
        kind,
        price,
        change,
        previous_close,
    })
}

/// Index tickers carry a caret prefix ("^GSPC") that must be
/// percent-encoded in the request path.
fn encode_symbol(symbol: &str) -> String {
    symbol.replace('^', "%5E")
}
