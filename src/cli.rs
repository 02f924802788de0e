use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::config::constants::{
    DEFAULT_OUTPUT_STEM, DEFAULT_PAGE_DELAY_MS, DEFAULT_PAGE_END, DEFAULT_PAGE_START,
    DEFAULT_PROFILE_CONCURRENCY, DEFAULT_PROFILE_DELAY_MS,
};
use crate::config::{LogFormat, OutputFormat, ScrapeConfig};
use crate::engine::pipeline::scrape_and_export;
use crate::error::ScoutError;
use crate::persistence::assembler::Table;
use crate::persistence::export::{export_csv, export_json, export_xlsx, import_csv};

#[derive(Parser, Debug)]
#[command(name = "partner-scout")]
#[command(about = "Scrapes the Odoo partner directory into a fixed-schema table")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// First listing page to fetch
    #[arg(long, default_value_t = DEFAULT_PAGE_START)]
    pub start: u32,

    /// Last listing page to fetch (inclusive)
    #[arg(long, default_value_t = DEFAULT_PAGE_END)]
    pub end: u32,

    /// Pause between listing pages in milliseconds (0 = none)
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_PAGE_DELAY_MS)]
    pub delay_ms: u64,

    /// Pause between profile fetches in milliseconds (0 = none)
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_PROFILE_DELAY_MS)]
    pub profile_delay_ms: u64,

    /// Profile pages fetched at once per listing page
    #[arg(short = 'j', long, default_value_t = DEFAULT_PROFILE_CONCURRENCY)]
    pub profile_concurrency: usize,

    /// Skip profile pages; profile columns stay empty and industry counts zero
    #[arg(long)]
    pub no_profiles: bool,

    /// Output path without extension
    #[arg(short, long, default_value = DEFAULT_OUTPUT_STEM)]
    pub output: PathBuf,

    /// Output format: csv, xlsx, json, both (csv + xlsx) or all
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Both)]
    pub format: OutputFormat,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Json, global = true)]
    pub log_format: LogFormat,

    /// Verbose logging (use -v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Re-normalize a previously exported CSV and write it back out
    Normalize {
        /// CSV file to read
        input: PathBuf,

        /// Output path without extension (defaults to overwriting the input's stem)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Both)]
        format: OutputFormat,
    },
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    pub fn into_config(self) -> ScrapeConfig {
        ScrapeConfig {
            page_start: self.start,
            page_end: self.end,
            page_delay: Duration::from_millis(self.delay_ms),
            profile_delay: Duration::from_millis(self.profile_delay_ms),
            profile_concurrency: self.profile_concurrency,
            fetch_profiles: !self.no_profiles,
            output_stem: self.output,
            output_format: self.format,
            ..Default::default()
        }
    }
}

/// Runs the selected command, returning the table that was written
pub async fn run(cli: Cli) -> Result<Table, ScoutError> {
    match cli.command {
        Some(Commands::Normalize {
            input,
            output,
            format,
        }) => {
            let stem = output.unwrap_or_else(|| input.with_extension(""));
            normalize_file(&input, &stem, format)
        }
        None => scrape_and_export(cli.into_config()).await,
    }
}

fn normalize_file(input: &Path, stem: &Path, format: OutputFormat) -> Result<Table, ScoutError> {
    let table = import_csv(input)?;
    info!(input = %input.display(), rows = table.len(), "Re-normalized export");

    if format.writes_csv() {
        export_csv(&table, &stem.with_extension("csv"))?;
    }
    if format.writes_xlsx() {
        export_xlsx(&table, &stem.with_extension("xlsx"))?;
    }
    if format.writes_json() {
        export_json(&table, &stem.with_extension("json"))?;
    }
    Ok(table)
}
