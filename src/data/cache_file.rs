use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[allow(unused_imports)]
use crate::config::DEBUG_FLAGS;
use crate::config::{PERSISTENCE, price_cache_filename};
use crate::data::provider::{PriceFetch, PriceRequest, PriceSeriesProvider, filter_to_request};
use crate::domain::PricePoint;
use crate::utils::time_utils::how_many_seconds_ago;

/// Serialized price cache for a single symbol (bincode).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CacheFile {
    pub version: f64,
    pub timestamp_ms: i64,
    pub symbol: String,
    pub points: Vec<PricePoint>,
}

impl CacheFile {
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>, version: f64) -> Self {
        Self {
            version,
            timestamp_ms: Utc::now().timestamp_millis(),
            symbol: symbol.into(),
            points,
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).context(format!("Failed to open cache file: {:?}", path))?;
        let mut reader = BufReader::new(file);
        let cache = bincode::deserialize_from(&mut reader)
            .context(format!("Failed to deserialize cache: {:?}", path))?;
        Ok(cache)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
        let file =
            File::create(path).context(format!("Failed to create file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, self)
            .context(format!("Failed to serialize cache to: {}", path.display()))
    }

    pub fn default_cache_path(symbol: &str) -> PathBuf {
        PathBuf::from(PERSISTENCE.price_cache.directory).join(price_cache_filename(symbol))
    }

    /// Version, symbol and recency checks against an already loaded cache.
    pub fn validate(
        &self,
        symbol: &str,
        recency_required_secs: i64,
        version_required: f64,
    ) -> Result<()> {
        if self.version != version_required {
            bail!(
                "Cache version mismatch: file v{} vs required v{}",
                self.version,
                version_required
            );
        }

        if self.symbol != symbol {
            bail!(
                "Cache symbol mismatch: file holds {}, expected {}",
                self.symbol,
                symbol
            );
        }

        let seconds_ago = how_many_seconds_ago(self.timestamp_ms);
        if seconds_ago > recency_required_secs {
            bail!(
                "Cache too old: created {} seconds ago (limit: {} seconds)",
                seconds_ago,
                recency_required_secs
            );
        }

        Ok(())
    }
}

pub fn check_cache_validity(
    path: &Path,
    symbol: &str,
    recency_required_secs: i64,
    version_required: f64,
) -> Result<()> {
    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_serde {
        log::info!("Checking validity of local cache at {:?}...", path);
    }

    let cache = CacheFile::load_from_path(path)?;
    cache.validate(symbol, recency_required_secs, version_required)?;

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_serde {
        log::info!(
            "✅ Cache valid: v{}, {} points for {}",
            cache.version,
            cache.points.len(),
            cache.symbol
        );
    }

    Ok(())
}

/// Write the full point list for `symbol` to `path`.
pub fn write_price_cache_locally(path: &Path, symbol: &str, points: &[PricePoint]) -> Result<()> {
    #[cfg(debug_assertions)]
    let start_time = DEBUG_FLAGS.print_serde.then(|| {
        log::info!("Writing cache to disk: {:?}...", path);
        std::time::Instant::now()
    });

    let cache = CacheFile::new(symbol, points.to_vec(), PERSISTENCE.price_cache.version);
    cache.save_to_path(path)?;

    #[cfg(debug_assertions)]
    if let Some(start) = start_time {
        log::info!(
            "✅ Cache written: {} points in {:.2}s",
            points.len(),
            start.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

/// Async wrapper for write_price_cache_locally
pub async fn write_price_cache_async(
    path: PathBuf,
    symbol: String,
    points: Vec<PricePoint>,
) -> Result<()> {
    tokio::task::spawn_blocking(move || write_price_cache_locally(&path, &symbol, &points))
        .await
        .context("Cache write task panicked")?
}

/// Serves prices from a bincode cache written by an earlier run or by `make_price_cache`.
pub struct CacheProvider {
    pub path: PathBuf,
}

#[async_trait]
impl PriceSeriesProvider for CacheProvider {
    fn signature(&self) -> &'static str {
        "Local Cache"
    }

    async fn fetch(&self, request: &PriceRequest) -> Result<PriceFetch> {
        let path = self.path.clone();
        let cache = tokio::task::spawn_blocking(move || CacheFile::load_from_path(&path))
            .await
            .context("Deserialization task panicked")?
            .context("Failed to load cache file")?;

        if cache.symbol != request.symbol {
            bail!(
                "Cache holds {} but {} was requested",
                cache.symbol,
                request.symbol
            );
        }

        Ok(PriceFetch::from_points(filter_to_request(
            &cache.points,
            request,
        )))
    }
}
