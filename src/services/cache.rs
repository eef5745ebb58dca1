//! TTL-with-fallback cache discipline shared by the aggregators.
//!
//! A cache slot holds one immutable snapshot behind a `tokio::sync::Mutex`.
//! Freshness gates whether a refresh is attempted; staleness never discards
//! the stored payload. The slot lock is held across the refresh future, so
//! concurrent miss callers coalesce into a single upstream fetch and then
//! read the freshly written slot.

use crate::error::AppError;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// How a cached read was satisfied.
pub enum CacheOutcome<T> {
    /// Within TTL; no upstream call was made
    Fresh(Arc<T>),
    /// Refresh succeeded; the slot was replaced wholesale
    Refreshed(Arc<T>),
    /// Refresh failed; returning the previous snapshot
    Stale(Arc<T>, AppError),
    /// Refresh failed and no previous snapshot exists
    Unavailable(AppError),
}

impl<T> CacheOutcome<T> {
    pub fn value(self) -> Option<Arc<T>> {
        match self {
            CacheOutcome::Fresh(v) | CacheOutcome::Refreshed(v) | CacheOutcome::Stale(v, _) => {
                Some(v)
            }
            CacheOutcome::Unavailable(_) => None,
        }
    }
}

struct Slot<K, T> {
    key: Option<K>,
    value: Option<Arc<T>>,
    fetched_at: Option<Instant>,
}

/// Single-slot TTL cache keyed by the request shape.
///
/// A read with a different key than the stored snapshot is a miss; settings
/// changes therefore naturally bypass snapshots for outdated symbol lists.
pub struct TtlCache<K, T> {
    ttl: Duration,
    slot: Mutex<Slot<K, T>>,
}

impl<K: PartialEq, T> TtlCache<K, T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(Slot {
                key: None,
                value: None,
                fetched_at: None,
            }),
        }
    }

    /// Treat the next read as unconditionally stale, keeping the stored
    /// payload available for fallback.
    pub async fn invalidate(&self) {
        let mut slot = self.slot.lock().await;
        slot.fetched_at = None;
    }

    /// Age of the stored snapshot; `None` when the slot is empty or has
    /// been invalidated.
    pub async fn age(&self) -> Option<Duration> {
        let slot = self.slot.lock().await;
        slot.fetched_at.map(|at| at.elapsed())
    }

    /// Return the cached snapshot if fresh, otherwise run `refresh` and
    /// replace the slot atomically on success. On failure the previous
    /// snapshot for the same key is returned as a stale fallback.
    pub async fn get_with<F, Fut>(&self, key: K, refresh: F) -> CacheOutcome<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let mut slot = self.slot.lock().await;

        let same_key = slot.key.as_ref() == Some(&key);
        let within_ttl = slot
            .fetched_at
            .map(|at| at.elapsed() < self.ttl)
            .unwrap_or(false);

        if same_key && within_ttl {
            if let Some(value) = &slot.value {
                return CacheOutcome::Fresh(Arc::clone(value));
            }
        }

        match refresh().await {
            Ok(value) => {
                let value = Arc::new(value);
                slot.key = Some(key);
                slot.value = Some(Arc::clone(&value));
                slot.fetched_at = Some(Instant::now());
                CacheOutcome::Refreshed(value)
            }
            Err(err) => match (&slot.key, &slot.value) {
                (Some(stored), Some(value)) if *stored == key => {
                    CacheOutcome::Stale(Arc::clone(value), err)
                }
                _ => CacheOutcome::Unavailable(err),
            },
        }
    }
}
