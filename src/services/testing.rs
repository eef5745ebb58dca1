//! Canned fetcher used by aggregator tests in place of the HTTP client.

use crate::error::{AppError, Result};
use crate::services::fetch::JsonFetcher;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Scripted response for one route.
#[derive(Clone)]
pub enum Canned {
    Json(Value),
    Network,
    Status(u16),
}

/// Routes requests by URL substring to canned responses and counts every
/// call, so tests can assert how many upstream fetches an operation issued.
#[derive(Default)]
pub struct CannedFetcher {
    routes: Mutex<Vec<(String, Canned)>>,
    calls: AtomicUsize,
}

impl CannedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the response for URLs containing `fragment`.
    pub fn route(&self, fragment: &str, response: Canned) {
        let mut routes = self.routes.lock().unwrap();
        if let Some(entry) = routes.iter_mut().find(|(f, _)| f == fragment) {
            entry.1 = response;
        } else {
            routes.push((fragment.to_string(), response));
        }
    }

    pub fn with_route(self, fragment: &str, response: Canned) -> Self {
        self.route(fragment, response);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JsonFetcher for CannedFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let routes = self.routes.lock().unwrap();
        let canned = routes
            .iter()
            .find(|(fragment, _)| url.contains(fragment.as_str()))
            .map(|(_, c)| c.clone());
        match canned {
            Some(Canned::Json(value)) => Ok(value),
            Some(Canned::Network) => Err(AppError::Network(format!("scripted outage: {}", url))),
            Some(Canned::Status(status)) => Err(AppError::Upstream { status }),
            None => Err(AppError::Network(format!("no canned route for {}", url))),
        }
    }
}
