use anyhow::{Context, Result};
use clap::Parser;
use tokio::runtime::Runtime;

use month_sniper::analysis::insights::MonthInsights;
use month_sniper::analysis::{build_month_profile_by_number, month_insights};
use month_sniper::data::cache_file::{CacheFile, write_price_cache_async};
use month_sniper::data::json_file::{JsonFileProvider, read_price_points};
use month_sniper::models::{AnnualInsights, SeriesOverview};
use month_sniper::{
    AnnualSummary, Cli, MonthProfile, PriceSeries, build_annual_summary, fetch_price_series,
};

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Data Loading (Blocking)
    let rt = Runtime::new().context("Failed to create Tokio runtime")?;
    let (request, points, signature) = rt.block_on(fetch_price_series(&args))?;

    // D. Background Cache Write (only when the prices came from the JSON file)
    let cache_task = match (&args.file, signature == JsonFileProvider::SIGNATURE) {
        (Some(file), true) => {
            let file = file.clone();
            let symbol = request.symbol.clone();
            Some(rt.spawn(async move {
                let all_points = tokio::task::spawn_blocking(move || read_price_points(&file))
                    .await
                    .context("JSON read task panicked")??;
                let path = CacheFile::default_cache_path(&symbol);
                write_price_cache_async(path, symbol, all_points).await
            }))
        }
        _ => None,
    };

    // E. Analysis
    let series = PriceSeries::from_points(request.symbol.clone(), points)?;
    log_overview(&series.symbol, &series.overview());

    match args.month {
        Some(month) => {
            let profile = build_month_profile_by_number(month, &series)
                .context(format!("Month {} is outside 1-12", month))?;
            let insights = month_insights(&profile);
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "profile": profile,
                        "insights": insights,
                    }))?
                );
            } else {
                print_profile(&profile, &insights);
            }
        }
        None => {
            let summary = build_annual_summary(&series);
            let insights = summary.insights();
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "summary": summary,
                        "insights": insights,
                    }))?
                );
            } else {
                print_summary(&summary, &insights);
            }
        }
    }

    if let Some(task) = cache_task {
        match rt.block_on(task) {
            Ok(Ok(())) => log::info!("Price cache refreshed for {}", request.symbol),
            Ok(Err(e)) => log::error!("⚠️  Failed to write cache: {:#}", e),
            Err(e) => log::error!("⚠️  Cache task panicked: {}", e),
        }
    }

    Ok(())
}

fn log_overview(symbol: &str, overview: &SeriesOverview) {
    if let (Some(first), Some(last)) = (overview.first_date, overview.last_date) {
        log::info!(
            "{}: {} to {}, {} days over {} years, {} return points",
            symbol,
            first,
            last,
            overview.total_days,
            overview.years_covered,
            overview.return_points
        );
    }
}

fn fmt_pct(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.*}%", decimals, v))
}

fn print_profile(profile: &MonthProfile, insights: &MonthInsights) {
    let Some((first_year, last_year)) = profile.year_span() else {
        println!("⚠️  Insufficient data for {}", profile.month_name());
        return;
    };

    println!(
        "{} analysis, based on {} years of data ({}-{})",
        profile.month_name(),
        profile.years.len(),
        first_year,
        last_year
    );

    println!("\nWeekly progression (cumulative return)");
    for (week, value) in &profile.weekly_return {
        println!("  week {}: {:>8.2}%", week, value);
    }

    println!("\nDay  momentum   win rate");
    let days: std::collections::BTreeSet<u32> = profile
        .momentum
        .keys()
        .chain(profile.win_rate.keys())
        .copied()
        .collect();
    for day in days {
        println!(
            "{:>3}  {:>9}  {:>8}",
            day,
            fmt_pct(profile.momentum.get(&day).copied(), 3),
            fmt_pct(profile.win_rate.get(&day).copied(), 1)
        );
    }

    println!(
        "\nAverage monthly return: {} (best week: {})",
        fmt_pct(insights.peak_return, 2),
        insights
            .best_week
            .map_or_else(|| "-".to_string(), |w| w.to_string())
    );
    println!(
        "Average daily momentum: {} ({})",
        fmt_pct(insights.mean_momentum, 3),
        insights.momentum_trend
    );
    println!(
        "Average win rate: {} ({})",
        fmt_pct(insights.mean_win_rate, 1),
        insights
            .win_rate_grade
            .map_or_else(|| "-".to_string(), |g| g.to_string())
    );
    if let Some(split) = insights.half_split {
        println!(
            "Days 1-{}: {} win rate, days {}-{}: {} win rate",
            split.mid_day,
            fmt_pct(split.first_half_win_rate, 1),
            split.mid_day + 1,
            split.last_day,
            fmt_pct(split.second_half_win_rate, 1)
        );
    }
}

fn print_summary(summary: &AnnualSummary, insights: &AnnualInsights) {
    println!(
        "{:<10} {:>12} {:>12} {:>10} {:>6}",
        "Month", "Avg return", "Avg momentum", "Win rate", "Years"
    );
    for row in &summary.rows {
        if !row.has_data() {
            println!("{:<10} {}", row.month_name, row.status);
            continue;
        }
        println!(
            "{:<10} {:>12} {:>12} {:>10} {:>6}",
            row.month_name,
            fmt_pct(row.peak_weekly_return, 2),
            fmt_pct(row.mean_momentum, 3),
            fmt_pct(row.mean_win_rate, 1),
            row.years
        );
    }

    let name = |month: Option<u32>| {
        month
            .and_then(|m| summary.rows.iter().find(|row| row.month == m))
            .map_or("-", |row| row.month_name.as_str())
    };
    println!(
        "\nBest month: {}  Weakest month: {}  Most reliable month: {}",
        name(insights.best_month),
        name(insights.worst_month),
        name(insights.most_reliable_month)
    );
}
