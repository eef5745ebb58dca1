pub mod cache;
pub mod crypto;
pub mod fetch;
pub mod overview;
pub mod quotes;
pub mod settings_store;

pub use cache::{CacheOutcome, TtlCache};
pub use crypto::{filter_by_allow_list, CryptoService};
pub use fetch::{HttpFetcher, JsonFetcher};
pub use overview::{market_overview, synthesize};
pub use quotes::QuoteService;
pub use settings_store::SettingsStore;

#[cfg(test)]
pub(crate) mod testing;
