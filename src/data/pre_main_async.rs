// Async loading that runs in main before any analysis starts

use anyhow::{Result, bail};
use std::path::PathBuf;

use crate::Cli;
#[allow(unused_imports)]
use crate::config::DEBUG_FLAGS;
use crate::config::PERSISTENCE;
use crate::data::cache_file::{CacheFile, CacheProvider, check_cache_validity};
use crate::data::json_file::JsonFileProvider;
use crate::data::provider::{PriceRequest, PriceSeriesProvider, get_price_series_async};
use crate::domain::PricePoint;

/// Build the provider chain for the CLI arguments.
/// An explicit `--file` comes first unless `--prefer-cache` is set; an invalid cache is skipped.
pub fn provider_chain(args: &Cli, cache_path: PathBuf) -> Vec<Box<dyn PriceSeriesProvider>> {
    let file_provider: Option<Box<dyn PriceSeriesProvider>> = args
        .file
        .clone()
        .map(|path| Box::new(JsonFileProvider { path }) as Box<dyn PriceSeriesProvider>);

    let cache_check = check_cache_validity(
        &cache_path,
        &args.symbol,
        args.max_cache_age_secs,
        PERSISTENCE.price_cache.version,
    );
    let cache_provider = || -> Box<dyn PriceSeriesProvider> {
        Box::new(CacheProvider {
            path: cache_path.clone(),
        })
    };

    match (args.prefer_cache, cache_check) {
        // cache first
        (true, Ok(_)) => std::iter::once(cache_provider())
            .chain(file_provider)
            .collect(),
        // file first (cache only when no file was given)
        (false, Ok(_)) => file_provider
            .into_iter()
            .chain(std::iter::once(cache_provider()))
            .collect(),
        (_, Err(e)) => {
            log::warn!("⚠️  Local cache unusable: {:#}", e);
            file_provider.into_iter().collect() // file only
        }
    }
}

/// Resolve the request from the CLI and fetch it through the provider chain.
pub async fn fetch_price_series(
    args: &Cli,
) -> Result<(PriceRequest, Vec<PricePoint>, &'static str)> {
    let request = PriceRequest {
        symbol: args.symbol.clone(),
        range: args.date_range()?,
    };

    let providers = provider_chain(args, CacheFile::default_cache_path(&args.symbol));
    if providers.is_empty() {
        bail!(
            "No price source for {}: pass --file <prices.json> or build a cache with make_price_cache",
            args.symbol
        );
    }

    let (points, signature) = get_price_series_async(&providers, &request).await?;

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_provider_chain {
        log::info!(
            "Successfully retrieved {} points for {} using: {}.",
            points.len(),
            request.symbol,
            signature
        );
    }

    Ok((request, points, signature))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::cache_file::write_price_cache_locally;
    use crate::domain::DateRange;
    use chrono::NaiveDate;
    use clap::Parser;

    fn cli(extra: &[&str]) -> Cli {
        let mut args = vec!["month-sniper", "--symbol", "TEST"];
        args.extend_from_slice(extra);
        Cli::parse_from(args)
    }

    #[test]
    fn missing_cache_leaves_only_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let args = cli(&["--file", "prices.json"]);
        let chain = provider_chain(&args, dir.path().join("missing.bin"));
        let signatures: Vec<_> = chain.iter().map(|p| p.signature()).collect();
        assert_eq!(signatures, vec!["JSON File"]);

        let no_file = cli(&[]);
        assert!(provider_chain(&no_file, dir.path().join("missing.bin")).is_empty());
    }

    #[test]
    fn valid_cache_order_follows_preference() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.bin");
        let points = vec![PricePoint::new(NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(), 1.0)];
        write_price_cache_locally(&path, "TEST", &points).unwrap();

        let file_first = provider_chain(&cli(&["--file", "prices.json"]), path.clone());
        let signatures: Vec<_> = file_first.iter().map(|p| p.signature()).collect();
        assert_eq!(signatures, vec!["JSON File", "Local Cache"]);

        let cache_first =
            provider_chain(&cli(&["--file", "prices.json", "--prefer-cache"]), path.clone());
        let signatures: Vec<_> = cache_first.iter().map(|p| p.signature()).collect();
        assert_eq!(signatures, vec!["Local Cache", "JSON File"]);

        let cache_only = provider_chain(&cli(&[]), path);
        let signatures: Vec<_> = cache_only.iter().map(|p| p.signature()).collect();
        assert_eq!(signatures, vec!["Local Cache"]);
    }

    #[tokio::test]
    async fn explicit_file_wins_over_a_fresh_cache_from_another_source() {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("cache.bin");
        let day = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        write_price_cache_locally(&cache_path, "TEST", &[PricePoint::new(day, 1.0)]).unwrap();

        let file_path = dir.path().join("b.json");
        std::fs::write(&file_path, r#"[{"date": "2020-01-02", "close": 999.0}]"#).unwrap();
        let file_arg = file_path.to_string_lossy().to_string();

        let request = PriceRequest {
            symbol: "TEST".to_string(),
            range: DateRange::parse("2020-01-01", "2020-02-01").unwrap(),
        };
        let chain = provider_chain(&cli(&["--file", &file_arg]), cache_path);
        let (points, signature) = get_price_series_async(&chain, &request).await.unwrap();

        assert_eq!(signature, "JSON File");
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].close, 999.0);
    }
}
