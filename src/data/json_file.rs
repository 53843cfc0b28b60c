use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;

#[allow(unused_imports)]
use crate::config::DEBUG_FLAGS;
use crate::data::provider::{PriceFetch, PriceRequest, PriceSeriesProvider, filter_to_request};
use crate::domain::PricePoint;

/// Read a JSON array of `{ "date": "YYYY-MM-DD", "close": f64 }` records.
pub fn read_price_points(path: &Path) -> Result<Vec<PricePoint>> {
    let file = File::open(path).context(format!("Failed to open price file: {:?}", path))?;
    let reader = BufReader::new(file);
    let points: Vec<PricePoint> = serde_json::from_reader(reader)
        .context(format!("Failed to parse price file: {:?}", path))?;

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_serde {
        log::info!("Read {} price points from {:?}", points.len(), path);
    }

    Ok(points)
}

/// Serves prices from a local JSON export (one file per symbol).
pub struct JsonFileProvider {
    pub path: PathBuf,
}

impl JsonFileProvider {
    pub const SIGNATURE: &'static str = "JSON File";
}

#[async_trait]
impl PriceSeriesProvider for JsonFileProvider {
    fn signature(&self) -> &'static str {
        Self::SIGNATURE
    }

    async fn fetch(&self, request: &PriceRequest) -> Result<PriceFetch> {
        let path = self.path.clone();
        let points = tokio::task::spawn_blocking(move || read_price_points(&path))
            .await
            .context("JSON read task panicked")??;
        Ok(PriceFetch::from_points(filter_to_request(&points, request)))
    }
}
