// * Run configuration for a single scrape
// * Built from CLI flags, validated once before the run starts

use clap::ValueEnum;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::constants::{
    DEFAULT_OUTPUT_STEM, DEFAULT_PAGE_DELAY_MS, DEFAULT_PAGE_END, DEFAULT_PAGE_START,
    DEFAULT_PROFILE_CONCURRENCY, DEFAULT_PROFILE_DELAY_MS, PAGE_URL_TEMPLATE, BASE_URL,
};
use crate::error::ScoutError;

/// Which files the exporter writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Xlsx,
    Json,
    /// CSV and XLSX side by side
    #[default]
    Both,
    /// CSV, XLSX and JSON
    All,
}

impl OutputFormat {
    pub fn writes_csv(&self) -> bool {
        matches!(self, OutputFormat::Csv | OutputFormat::Both | OutputFormat::All)
    }

    pub fn writes_xlsx(&self) -> bool {
        matches!(self, OutputFormat::Xlsx | OutputFormat::Both | OutputFormat::All)
    }

    pub fn writes_json(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::All)
    }
}

/// Log line rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Configuration for one scrape run
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Site root used to resolve relative profile links
    pub base_url: String,
    /// Listing page template with a `{}` page placeholder
    pub page_url_template: String,
    /// First listing page (inclusive)
    pub page_start: u32,
    /// Last listing page (inclusive)
    pub page_end: u32,
    /// Pause between listing pages
    pub page_delay: Duration,
    /// Pause after each successful profile fetch
    pub profile_delay: Duration,
    /// Profile fetches in flight per listing page
    pub profile_concurrency: usize,
    /// Whether profile pages are visited at all
    pub fetch_profiles: bool,
    /// Output path without extension
    pub output_stem: PathBuf,
    pub output_format: OutputFormat,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            page_url_template: PAGE_URL_TEMPLATE.to_string(),
            page_start: DEFAULT_PAGE_START,
            page_end: DEFAULT_PAGE_END,
            page_delay: Duration::from_millis(DEFAULT_PAGE_DELAY_MS),
            profile_delay: Duration::from_millis(DEFAULT_PROFILE_DELAY_MS),
            profile_concurrency: DEFAULT_PROFILE_CONCURRENCY,
            fetch_profiles: true,
            output_stem: PathBuf::from(DEFAULT_OUTPUT_STEM),
            output_format: OutputFormat::default(),
        }
    }
}

impl ScrapeConfig {
    /// Rejects page ranges and limits the run cannot honour
    pub fn validate(&self) -> Result<(), ScoutError> {
        if self.page_start == 0 {
            return Err(ScoutError::Config("page numbers start at 1".to_string()));
        }
        if self.page_end < self.page_start {
            return Err(ScoutError::Config(format!(
                "end page {} is before start page {}",
                self.page_end, self.page_start
            )));
        }
        if self.profile_concurrency == 0 {
            return Err(ScoutError::Config(
                "profile concurrency must be at least 1".to_string(),
            ));
        }
        if !self.page_url_template.contains("{}") {
            return Err(ScoutError::Config(
                "page URL template needs a {} placeholder".to_string(),
            ));
        }
        Ok(())
    }

    /// Listing page URL for a page number
    pub fn page_url(&self, page: u32) -> String {
        self.page_url_template.replacen("{}", &page.to_string(), 1)
    }

    /// Number of listing pages in the configured range
    pub fn page_count(&self) -> u32 {
        self.page_end.saturating_sub(self.page_start) + 1
    }

    pub fn csv_path(&self) -> PathBuf {
        self.output_stem.with_extension("csv")
    }

    pub fn xlsx_path(&self) -> PathBuf {
        self.output_stem.with_extension("xlsx")
    }

    pub fn json_path(&self) -> PathBuf {
        self.output_stem.with_extension("json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ScrapeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.page_count(), 188);
        assert_eq!(config.page_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_page_url_substitution() {
        let config = ScrapeConfig::default();
        assert_eq!(
            config.page_url(7),
            "https://www.odoo.com/partners/page/7?country_all=True"
        );
    }

    #[test]
    fn test_reversed_range_rejected() {
        let config = ScrapeConfig {
            page_start: 10,
            page_end: 3,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ScoutError::Config(_))));
    }

    #[test]
    fn test_zero_start_and_concurrency_rejected() {
        let config = ScrapeConfig {
            page_start: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ScrapeConfig {
            profile_concurrency: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_output_paths() {
        let config = ScrapeConfig {
            output_stem: PathBuf::from("out/partners"),
            ..Default::default()
        };
        assert_eq!(config.csv_path(), PathBuf::from("out/partners.csv"));
        assert_eq!(config.xlsx_path(), PathBuf::from("out/partners.xlsx"));
        assert_eq!(config.json_path(), PathBuf::from("out/partners.json"));
    }

    #[test]
    fn test_output_format_selection() {
        assert_eq!(OutputFormat::default(), OutputFormat::Both);
        assert!(OutputFormat::Both.writes_csv() && OutputFormat::Both.writes_xlsx());
        assert!(!OutputFormat::Both.writes_json());
        assert!(OutputFormat::All.writes_csv() && OutputFormat::All.writes_xlsx() && OutputFormat::All.writes_json());
        assert!(OutputFormat::Xlsx.writes_xlsx() && !OutputFormat::Xlsx.writes_csv());
        assert!(!OutputFormat::Json.writes_csv());
    }
}
