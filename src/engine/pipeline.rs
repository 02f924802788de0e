// * Scrape pipeline
// * Walks the configured listing pages in order, parses partner rows, attaches
// * cached profile extras and hands the drafts to the assembler.

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ScrapeConfig;
use crate::engine::normalization::resolve_profile_url;
use crate::engine::profile_cache::ProfileCache;
use crate::engine::rate_limiter::Pacer;
use crate::error::ScoutError;
use crate::network::client::ScoutClient;
use crate::network::source::PageSource;
use crate::persistence::assembler::{assemble, Table};
use crate::persistence::export::{export_csv, export_json, export_xlsx};
use crate::persistence::record::PartnerDraft;
use crate::refinery::anchors::extract_anchors;
use crate::refinery::list_row::{is_candidate, parse_candidate};
use crate::refinery::profile::{extract_from_html, ProfileExtras};

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub pages_fetched: usize,
    pub pages_failed: usize,
    pub anchors_seen: usize,
    pub candidates: usize,
    pub drafts: usize,
    pub drafts_without_profile: usize,
    pub profile_fetches: usize,
    pub profile_failures: usize,
    pub profile_cache_hits: usize,
}

/// Drafts in first-seen listing order, plus counters
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    pub drafts: Vec<PartnerDraft>,
    pub stats: RunStats,
}

impl RunOutcome {
    pub fn into_table(self) -> Table {
        assemble(self.drafts)
    }
}

pub struct ScrapeRun {
    config: ScrapeConfig,
    page_pacer: Pacer,
}

impl ScrapeRun {
    pub fn new(config: ScrapeConfig) -> Self {
        Self {
            page_pacer: Pacer::new(config.page_delay),
            config,
        }
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Scrapes every configured page. Unavailable pages and profiles contribute nothing.
    pub async fn run<S>(&self, source: &S, cache: &ProfileCache) -> RunOutcome
    where
        S: PageSource + ?Sized,
    {
        let mut outcome = RunOutcome::default();

        for page in self.config.page_start..=self.config.page_end {
            self.page_pacer.wait().await;
            info!(page = page, url = %self.config.page_url(page), "Fetching listing page");

            let html = match source.fetch_page(page).await {
                Ok(html) => html,
                Err(e) => {
                    warn!(page = page, status = ?e.status(), error = %e, "Listing page unavailable, skipping");
                    outcome.stats.pages_failed += 1;
                    continue;
                }
            };
            outcome.stats.pages_fetched += 1;

            let drafts = self.parse_listing(&html, &mut outcome.stats);
            debug!(page = page, partners = drafts.len(), "Listing page parsed");

            let merged = self.attach_profiles(source, cache, drafts).await;
            outcome.stats.drafts += merged.len();
            outcome.drafts.extend(merged);
        }

        let cache_stats = cache.stats();
        outcome.stats.profile_fetches = cache_stats.fetches;
        outcome.stats.profile_failures = cache_stats.failures;
        outcome.stats.profile_cache_hits = cache_stats.hits();

        info!(
            pages_fetched = outcome.stats.pages_fetched,
            pages_failed = outcome.stats.pages_failed,
            drafts = outcome.stats.drafts,
            profile_fetches = outcome.stats.profile_fetches,
            profile_failures = outcome.stats.profile_failures,
            "Scrape finished"
        );

        outcome
    }

    /// Listing HTML -> drafts with resolved profile URLs, in anchor order
    pub fn parse_listing(&self, html: &str, stats: &mut RunStats) -> Vec<PartnerDraft> {
        let mut drafts = Vec::new();

        for anchor in extract_anchors(html) {
            stats.anchors_seen += 1;
            if !is_candidate(&anchor.text) {
                continue;
            }
            stats.candidates += 1;

            let Some(draft) = parse_candidate(&anchor.text) else {
                continue;
            };

            let profile_url = anchor
                .href
                .as_deref()
                .map(|href| resolve_profile_url(href, &self.config.base_url))
                .unwrap_or_default();

            if profile_url.is_empty() {
                stats.drafts_without_profile += 1;
            }
            drafts.push(draft.with_profile_url(profile_url));
        }

        drafts
    }

    // * Profile fetches fan out up to the configured concurrency; `buffered`
    // * yields results in input order, so listing order is preserved.
    async fn attach_profiles<S>(
        &self,
        source: &S,
        cache: &ProfileCache,
        drafts: Vec<PartnerDraft>,
    ) -> Vec<PartnerDraft>
    where
        S: PageSource + ?Sized,
    {
        stream::iter(drafts)
            .map(|draft| async move {
                let extras = self.profile_for(source, cache, &draft.profile_url).await;
                draft.with_extras(extras)
            })
            .buffered(self.config.profile_concurrency.max(1))
            .collect()
            .await
    }

    async fn profile_for<S>(&self, source: &S, cache: &ProfileCache, url: &str) -> ProfileExtras
    where
        S: PageSource + ?Sized,
    {
        if url.is_empty() || !self.config.fetch_profiles {
            return ProfileExtras::default();
        }

        cache
            .get_or_fetch(url, || async move {
                let html = source.fetch_profile(url).await?;
                // * Politeness pause follows a successful fetch only
                if !self.config.profile_delay.is_zero() {
                    tokio::time::sleep(self.config.profile_delay).await;
                }
                Ok(extract_from_html(&html))
            })
            .await
    }
}

/// Full run against the live site: scrape, assemble, export
pub async fn scrape_and_export(config: ScrapeConfig) -> Result<Table, ScoutError> {
    config.validate()?;

    let client = ScoutClient::from_config(&config)?;
    let cache = ProfileCache::new();
    let run = ScrapeRun::new(config);

    info!(
        pages = run.config().page_count(),
        start = run.config().page_start,
        end = run.config().page_end,
        "Starting partner scrape"
    );

    let outcome = run.run(&client, &cache).await;
    let table = outcome.into_table();

    let config = run.config();
    if config.output_format.writes_csv() {
        export_csv(&table, &config.csv_path())?;
    }
    if config.output_format.writes_xlsx() {
        export_xlsx(&table, &config.xlsx_path())?;
    }
    if config.output_format.writes_json() {
        export_json(&table, &config.json_path())?;
    }

    info!(rows = table.len(), "Export complete");
    Ok(table)
}
