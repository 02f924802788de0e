// * Scrape engine: URL handling, pacing, the profile cache and the page walk.

pub mod normalization;
pub mod pipeline;
pub mod profile_cache;
pub mod rate_limiter;

// * Re-exports for convenient access
pub use normalization::resolve_profile_url;
pub use pipeline::{scrape_and_export, RunOutcome, RunStats, ScrapeRun};
pub use profile_cache::{CacheStats, ProfileCache};
pub use rate_limiter::Pacer;
