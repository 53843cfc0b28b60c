use anyhow::{Context, Result};
use clap::Parser;
use month_sniper::config::PERSISTENCE;
use month_sniper::data::cache_file::CacheFile;
use month_sniper::data::json_file::read_price_points;
use std::path::PathBuf;

/// Convert a JSON price export into the binary cache read by `month-sniper`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON price file: [{"date": "YYYY-MM-DD", "close": 123.4}, ...]
    source: PathBuf,

    /// Symbol the prices belong to
    #[arg(long)]
    symbol: String,

    /// Output path (defaults to the standard cache location for the symbol)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    build_price_cache(Args::parse())
}

fn build_price_cache(args: Args) -> Result<()> {
    let mut points = read_price_points(&args.source)
        .with_context(|| format!("Failed to load source prices {:?}", args.source))?;

    let total = points.len();
    points.retain(|p| p.has_valid_close());
    points.sort_by_key(|p| p.date);

    println!(
        "Loaded {} points from {:?} ({} dropped for bad closes)",
        points.len(),
        args.source,
        total - points.len()
    );

    let output_path = args
        .output
        .unwrap_or_else(|| CacheFile::default_cache_path(&args.symbol));
    let cache = CacheFile::new(args.symbol, points, PERSISTENCE.price_cache.version);
    cache.save_to_path(&output_path)?;

    println!(
        "✅ Cache written to {:?} with {} points for {}.",
        output_path,
        cache.points.len(),
        cache.symbol
    );
    Ok(())
}
