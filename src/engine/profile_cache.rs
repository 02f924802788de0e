// * Profile cache: URL -> extracted extras for the lifetime of one run.
// * Requests for a URL already in flight await that fetch instead of refetching.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, warn};

use crate::network::errors::NetworkError;
use crate::refinery::profile::ProfileExtras;

/// Counters for one cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub requests: usize,
    pub fetches: usize,
    pub failures: usize,
}

impl CacheStats {
    pub fn hits(&self) -> usize {
        self.requests.saturating_sub(self.fetches)
    }
}

#[derive(Debug, Default)]
pub struct ProfileCache {
    entries: Mutex<HashMap<String, Arc<OnceCell<ProfileExtras>>>>,
    requests: AtomicUsize,
    fetches: AtomicUsize,
    failures: AtomicUsize,
}

impl ProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns cached extras for `url`, running `fetch` at most once per URL.
    /// A failed fetch is logged and cached as default extras.
    pub async fn get_or_fetch<F, Fut>(&self, url: &str, fetch: F) -> ProfileExtras
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ProfileExtras, NetworkError>>,
    {
        self.requests.fetch_add(1, Ordering::Relaxed);

        let cell = {
            let mut entries = self.entries.lock().await;
            Arc::clone(
                entries
                    .entry(url.to_string())
                    .or_insert_with(|| Arc::new(OnceCell::new())),
            )
        };

        let extras = cell
            .get_or_init(|| async move {
                self.fetches.fetch_add(1, Ordering::Relaxed);
                match fetch().await {
                    Ok(extras) => {
                        debug!(url = url, "Profile extracted");
                        extras
                    }
                    Err(e) => {
                        self.failures.fetch_add(1, Ordering::Relaxed);
                        warn!(url = url, error = %e, "Profile unavailable, using defaults");
                        ProfileExtras::default()
                    }
                }
            })
            .await;

        extras.clone()
    }

    /// Cached extras for `url`, if its fetch has completed
    pub async fn get(&self, url: &str) -> Option<ProfileExtras> {
        let entries = self.entries.lock().await;
        entries.get(url).and_then(|cell| cell.get().cloned())
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            requests: self.requests.load(Ordering::Relaxed),
            fetches: self.fetches.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}
