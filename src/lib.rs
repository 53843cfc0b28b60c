#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod utils;

use std::path::PathBuf;

use anyhow::Result;

// Re-export commonly used types
pub use analysis::{build_annual_summary, build_month_profile, month_insights};
pub use data::fetch_price_series;
pub use domain::{DailyObservation, DateRange, PricePoint};
pub use models::{AnnualSummary, MonthProfile, PriceSeries, SummaryRow};

use crate::config::{DATE_RANGE_PRESETS, PERSISTENCE, find_preset};
use crate::utils::time_utils::{local_today, parse_date};

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Ticker symbol the prices belong to (also keys the local cache)
    #[arg(long, default_value = "^GSPC")]
    pub symbol: String,

    /// JSON price file: [{"date": "YYYY-MM-DD", "close": 123.4}, ...]
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Start date (inclusive), YYYY-MM-DD
    #[arg(long, conflicts_with = "preset")]
    pub start: Option<String>,

    /// End date (exclusive), YYYY-MM-DD; defaults to today
    #[arg(long, conflicts_with = "preset")]
    pub end: Option<String>,

    /// Named date range, e.g. "Last 10 Years"
    #[arg(long)]
    pub preset: Option<String>,

    /// Calendar month 1-12; omit for the annual summary
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Emit JSON instead of a text table
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Serve from a valid local cache before reading `--file`
    #[arg(long, default_value_t = false)]
    pub prefer_cache: bool,

    /// Maximum age of the local cache before it is ignored
    #[arg(long, default_value_t = PERSISTENCE.price_cache.acceptable_age_secs)]
    pub max_cache_age_secs: i64,
}

impl Cli {
    /// Explicit preset wins; otherwise `--start` (default: first preset start) to `--end` (default: today).
    pub fn date_range(&self) -> Result<DateRange> {
        if let Some(name) = &self.preset {
            let preset = find_preset(name).ok_or_else(|| {
                let known: Vec<_> = DATE_RANGE_PRESETS.iter().map(|p| p.name).collect();
                anyhow::anyhow!("Unknown preset '{}'. Known presets: {}", name, known.join(", "))
            })?;
            return DateRange::from_preset(preset);
        }

        let start = match &self.start {
            Some(text) => parse_date(text)?,
            None => parse_date(DATE_RANGE_PRESETS[0].start)?,
        };
        let end = match &self.end {
            Some(text) => parse_date(text)?,
            None => local_today(),
        };
        DateRange::new(start, end)
    }
}
