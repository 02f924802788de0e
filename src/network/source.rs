// * PageSource: the fetch collaborator the scrape pipeline depends on.
// * The live implementation is `ScoutClient`; `InMemorySource` serves canned HTML.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Duration;

use crate::network::errors::NetworkError;

/// Boxed future returned by every fetch
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<String, NetworkError>> + Send + 'a>>;

/// Source of raw listing and profile HTML
pub trait PageSource: Send + Sync {
    /// Fetches one listing page by number
    fn fetch_page(&self, page: u32) -> FetchFuture<'_>;

    /// Fetches one absolute profile URL
    fn fetch_profile<'a>(&'a self, url: &'a str) -> FetchFuture<'a>;
}

/// Canned pages keyed by page number and profile URL
#[derive(Debug, Default)]
pub struct InMemorySource {
    pages: HashMap<u32, String>,
    profiles: HashMap<String, String>,
    latency: Option<Duration>,
    profile_hits: Mutex<HashMap<String, usize>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32, html: impl Into<String>) -> Self {
        self.pages.insert(page, html.into());
        self
    }

    pub fn with_profile(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.profiles.insert(url.into(), html.into());
        self
    }

    /// Delays every profile response, so concurrent requests overlap
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// How many times a profile URL was requested
    pub fn profile_hits(&self, url: &str) -> usize {
        self.profile_hits
            .lock()
            .map(|hits| hits.get(url).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    fn record_hit(&self, url: &str) {
        if let Ok(mut hits) = self.profile_hits.lock() {
            *hits.entry(url.to_string()).or_insert(0) += 1;
        }
    }
}

impl PageSource for InMemorySource {
    fn fetch_page(&self, page: u32) -> FetchFuture<'_> {
        let result = self
            .pages
            .get(&page)
            .cloned()
            .ok_or(NetworkError::Status(404));
        Box::pin(async move { result })
    }

    fn fetch_profile<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        self.record_hit(url);
        let result = self
            .profiles
            .get(url)
            .cloned()
            .ok_or_else(|| NetworkError::Unavailable(url.to_string()));
        let latency = self.latency;
        Box::pin(async move {
            if let Some(delay) = latency {
                tokio::time::sleep(delay).await;
            }
            result
        })
    }
}
