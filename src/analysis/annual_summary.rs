use chrono::Month;
use rayon::prelude::*;

use crate::analysis::month_profile::build_month_profile;
#[allow(unused_imports)]
use crate::config::DEBUG_FLAGS;
use crate::models::{AnnualSummary, MonthProfile, PriceSeries, SummaryRow};

pub const ALL_MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Profiles for January..=December. Months are independent, so they are
/// computed in parallel; `collect` keeps them in month order.
pub fn build_all_profiles(series: &PriceSeries) -> Vec<MonthProfile> {
    ALL_MONTHS
        .par_iter()
        .map(|&month| build_month_profile(month, series))
        .collect()
}

pub fn summarize_profiles(profiles: &[MonthProfile]) -> AnnualSummary {
    AnnualSummary {
        rows: profiles.iter().map(SummaryRow::from_profile).collect(),
    }
}

/// Twelve rows, January first. Months without a qualifying year are kept as
/// insufficient-data rows.
pub fn build_annual_summary(series: &PriceSeries) -> AnnualSummary {
    #[cfg(debug_assertions)]
    let start_time = DEBUG_FLAGS
        .print_profile_timing
        .then(std::time::Instant::now);

    let summary = summarize_profiles(&build_all_profiles(series));

    #[cfg(debug_assertions)]
    if let Some(start) = start_time {
        log::info!(
            "Annual summary for {}: {}/12 months with data in {:?}",
            series.symbol,
            summary.rows_with_data().count(),
            start.elapsed()
        );
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PricePoint;
    use crate::models::SummaryStatus;
    use chrono::{Datelike, NaiveDate};

    /// Every weekday of `years`, gently trending with a weekly wiggle.
    fn weekday_series(years: std::ops::RangeInclusive<i32>) -> PriceSeries {
        let mut date = NaiveDate::from_ymd_opt(*years.start(), 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(*years.end(), 12, 31).unwrap();
        let mut points = Vec::new();
        let mut i = 0.0_f64;
        while date <= end {
            if date.weekday().number_from_monday() <= 5 {
                points.push(PricePoint::new(date, 100.0 + i * 0.05 + (i * 0.7).sin()));
                i += 1.0;
            }
            date = date.succ_opt().unwrap();
        }
        PriceSeries::from_points("TEST", points).unwrap()
    }

    #[test]
    fn twelve_rows_in_month_order() {
        let summary = build_annual_summary(&weekday_series(2018..=2020));
        assert_eq!(summary.rows.len(), 12);
        assert_eq!(
            summary.rows.iter().map(|r| r.month).collect::<Vec<_>>(),
            (1..=12).collect::<Vec<_>>()
        );
        assert!(summary.rows.iter().all(|r| r.has_data() && r.years == 3));
        assert!(
            summary
                .rows
                .iter()
                .all(|r| (0.0..=100.0).contains(&r.mean_win_rate.unwrap()))
        );
    }

    #[test]
    fn partial_year_flags_missing_months() {
        // Only January..=March present
        let series = weekday_series(2020..=2020);
        let trimmed = PriceSeries {
            symbol: series.symbol.clone(),
            observations: series
                .observations
                .into_iter()
                .filter(|o| o.date.month() <= 3)
                .collect(),
        };
        let summary = build_annual_summary(&trimmed);

        assert_eq!(summary.rows.len(), 12);
        assert_eq!(summary.rows_with_data().count(), 3);
        assert_eq!(summary.rows[3].status, SummaryStatus::InsufficientData);
        assert_eq!(summary.rows[3].peak_weekly_return, None);
        assert_eq!(summary.rows[11].month_name, "December");
    }

    #[test]
    fn empty_series_gives_twelve_insufficient_rows() {
        let summary = build_annual_summary(&PriceSeries::default());
        assert_eq!(summary.rows.len(), 12);
        assert!(summary.rows.iter().all(|r| !r.has_data()));
    }

    #[test]
    fn parallel_run_matches_sequential_and_repeats() {
        let series = weekday_series(2015..=2019);
        let sequential: Vec<MonthProfile> = ALL_MONTHS
            .iter()
            .map(|&m| build_month_profile(m, &series))
            .collect();
        assert_eq!(build_all_profiles(&series), sequential);
        assert_eq!(build_annual_summary(&series), build_annual_summary(&series));
    }
}
