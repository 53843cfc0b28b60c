use anyhow::{Result, anyhow};
use async_trait::async_trait;

#[allow(unused_imports)]
use crate::config::DEBUG_FLAGS;
use crate::domain::{DateRange, PricePoint};

/// What the caller wants: one symbol over one date range.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRequest {
    pub symbol: String,
    pub range: DateRange,
}

/// A provider either has prices for the request or says explicitly that it has none.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceFetch {
    Series(Vec<PricePoint>),
    NoData,
}

impl PriceFetch {
    /// Wrap filtered points, turning an empty result into `NoData`.
    pub fn from_points(points: Vec<PricePoint>) -> Self {
        if points.is_empty() {
            PriceFetch::NoData
        } else {
            PriceFetch::Series(points)
        }
    }
}

#[async_trait]
pub trait PriceSeriesProvider: Send + Sync {
    // Either return prices (or an explicit NoData) OR an anyhow::Error
    async fn fetch(&self, request: &PriceRequest) -> Result<PriceFetch>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

/// Keep the points inside the request's range with a usable close.
pub fn filter_to_request(points: &[PricePoint], request: &PriceRequest) -> Vec<PricePoint> {
    points
        .iter()
        .filter(|p| request.range.contains(p.date) && p.has_valid_close())
        .copied()
        .collect()
}

/// Try each provider in order and return the first that has data.
pub async fn get_price_series_async(
    providers: &[Box<dyn PriceSeriesProvider>],
    request: &PriceRequest,
) -> Result<(Vec<PricePoint>, &'static str)> {
    for provider in providers {
        match provider.fetch(request).await {
            Ok(PriceFetch::Series(points)) => {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_provider_chain {
                    log::info!(
                        "{} served {} points for {} ({})",
                        provider.signature(),
                        points.len(),
                        request.symbol,
                        request.range
                    );
                }
                return Ok((points, provider.signature()));
            }
            Ok(PriceFetch::NoData) => {
                log::info!(
                    "{} has no data for {} ({})",
                    provider.signature(),
                    request.symbol,
                    request.range
                );
            }
            Err(e) => {
                log::info!("Error with provider {}: {:#}", provider.signature(), e);
                // Continue to the next provider
            }
        }
    }
    Err(anyhow!(
        "No data available for {} between {}",
        request.symbol,
        request.range
    ))
}
