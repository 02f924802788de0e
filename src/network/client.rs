use crate::config::constants::REQUEST_TIMEOUT_MS;
use crate::config::ScrapeConfig;
use crate::network::errors::NetworkError;
use crate::network::identity::BrowserHeaders;
use crate::network::source::{FetchFuture, PageSource};
use reqwest::Client;
use std::time::Duration;

// * The HTTP engine behind listing and profile fetches.
pub struct ScoutClient {
    inner: Client,
    page_url_template: String,
}

impl ScoutClient {
    // * Builds the client with the static browser header set.
    // * @param page_url_template - Listing URL with a `{}` page placeholder
    pub fn new(page_url_template: &str) -> Result<Self, NetworkError> {
        let headers = BrowserHeaders::desktop_chrome().to_header_map()?;

        let client = Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .timeout(Duration::from_millis(REQUEST_TIMEOUT_MS))
            .build()?;

        Ok(Self {
            inner: client,
            page_url_template: page_url_template.to_string(),
        })
    }

    pub fn from_config(config: &ScrapeConfig) -> Result<Self, NetworkError> {
        Self::new(&config.page_url_template)
    }

    pub fn page_url(&self, page: u32) -> String {
        self.page_url_template.replacen("{}", &page.to_string(), 1)
    }

    // * Fetches a URL; anything but a 2xx with a body is an error.
    pub async fn fetch(&self, url: &str) -> Result<String, NetworkError> {
        let resp = self.inner.get(url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            return Err(NetworkError::Status(status.as_u16()));
        }

        let body = resp.text().await?;

        if body.trim().is_empty() {
            return Err(NetworkError::EmptyResponse);
        }

        tracing::debug!(url = url, bytes = body.len(), "Fetched");
        Ok(body)
    }
}

impl PageSource for ScoutClient {
    fn fetch_page(&self, page: u32) -> FetchFuture<'_> {
        let url = self.page_url(page);
        Box::pin(async move { self.fetch(&url).await })
    }

    fn fetch_profile<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(self.fetch(url))
    }
}
