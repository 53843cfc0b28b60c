use chrono::Month;

use crate::analysis::aggregators::{momentum_by_day, weekly_return, win_rate_by_day};
use crate::analysis::features::{DerivedSlice, derive_features};
use crate::analysis::slicer::slice_month;
#[allow(unused_imports)]
use crate::config::DEBUG_FLAGS;
use crate::models::{MonthProfile, PriceSeries};

/// Build the seasonality profile of one calendar month from the full series.
/// Pure and deterministic: the same series always yields the same profile.
pub fn build_month_profile(month: Month, series: &PriceSeries) -> MonthProfile {
    #[cfg(debug_assertions)]
    let start_time = DEBUG_FLAGS
        .print_profile_timing
        .then(std::time::Instant::now);

    let slices = slice_month(&series.observations, month);
    if slices.is_empty() {
        return MonthProfile::empty(month);
    }

    // BTreeMap iteration keeps years ascending
    let derived: Vec<DerivedSlice> = slices.values().map(derive_features).collect();

    let profile = MonthProfile {
        month: month.number_from_month(),
        weekly_return: weekly_return(&derived),
        momentum: momentum_by_day(&derived),
        win_rate: win_rate_by_day(&derived),
        years: slices.keys().copied().collect(),
    };

    #[cfg(debug_assertions)]
    if let Some(start) = start_time {
        log::info!(
            "{} profile for {}: {} years in {:?}",
            month.name(),
            series.symbol,
            profile.years.len(),
            start.elapsed()
        );
    }

    profile
}

/// Convenience for callers holding a raw month number. `None` outside 1..=12.
pub fn build_month_profile_by_number(month: u32, series: &PriceSeries) -> Option<MonthProfile> {
    let month = Month::try_from(u8::try_from(month).ok()?).ok()?;
    Some(build_month_profile(month, series))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PricePoint;
    use chrono::{Datelike, NaiveDate};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// Weekday points for `month` of `year`, closes produced by `close_for(day_idx)`.
    fn month_points(
        year: i32,
        month: u32,
        trading_days: usize,
        close_for: impl Fn(usize) -> f64,
    ) -> Vec<PricePoint> {
        let mut date = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        let mut points = Vec::new();
        while points.len() < trading_days && date.month() == month {
            if date.weekday().number_from_monday() <= 5 {
                points.push(PricePoint::new(date, close_for(points.len())));
            }
            date = date.succ_opt().unwrap();
        }
        points
    }

    fn series(points: Vec<PricePoint>) -> PriceSeries {
        PriceSeries::from_points("TEST", points).unwrap()
    }

    #[test]
    fn nine_valid_days_do_not_qualify_ten_do() {
        // A December anchor gives every January day a defined return
        let anchor = PricePoint::new(NaiveDate::from_ymd_opt(2019, 12, 31).unwrap(), 100.0);
        let mut nine = vec![anchor];
        nine.extend(month_points(2020, 1, 9, |i| 100.0 + i as f64));
        assert!(!build_month_profile(Month::January, &series(nine)).has_data());

        let mut ten = vec![anchor];
        ten.extend(month_points(2020, 1, 10, |i| 100.0 + i as f64));
        let profile = build_month_profile(Month::January, &series(ten));
        assert_eq!(profile.years, vec![2020]);
    }

    #[test]
    fn very_first_observation_is_excluded_from_its_slice() {
        // Series starts inside the month: the first day has no return
        let points = month_points(2020, 1, 10, |i| 100.0 + i as f64);
        let profile = build_month_profile(Month::January, &series(points));
        assert!(!profile.has_data());
    }

    #[test]
    fn two_years_share_days_for_win_rate() {
        let mut points = vec![PricePoint::new(
            NaiveDate::from_ymd_opt(2020, 2, 28).unwrap(),
            100.0,
        )];
        points.extend(month_points(2020, 3, 12, |i| 100.0 + i as f64));
        points.push(PricePoint::new(
            NaiveDate::from_ymd_opt(2021, 2, 26).unwrap(),
            200.0,
        ));
        points.extend(month_points(2021, 3, 12, |i| 200.0 - i as f64));

        let profile = build_month_profile(Month::March, &series(points));
        assert_eq!(profile.years, vec![2020, 2021]);

        // Day 3 rises in 2020 and falls in 2021
        assert!(approx_eq(profile.win_rate[&3], 50.0));
        // Day 2 is flat in 2020 (first March close equals the anchor) and falls in 2021
        assert!(approx_eq(profile.win_rate[&2], 0.0));
        // 2020-03-01 is a Sunday, so day 1 only has the flat 2021 open
        assert!(approx_eq(profile.win_rate[&1], 0.0));
        assert!(profile.win_rate.values().all(|w| (0.0..=100.0).contains(w)));
        assert!(profile.weekly_return.keys().all(|w| (1..=4).contains(w)));
    }

    #[test]
    fn momentum_boundary_days_never_contribute() {
        let mut points = vec![PricePoint::new(
            NaiveDate::from_ymd_opt(2021, 5, 31).unwrap(),
            50.0,
        )];
        // June 2021: Tue 1st .. Mon 14th = 10 trading days
        points.extend(month_points(2021, 6, 10, |i| 50.0 + i as f64));
        let profile = build_month_profile(Month::June, &series(points));

        assert_eq!(profile.years, vec![2021]);
        assert!(!profile.momentum.contains_key(&1));
        assert!(!profile.momentum.contains_key(&14));
        assert!(profile.momentum.contains_key(&2));
        assert!(profile.win_rate.contains_key(&1));
        assert!(profile.win_rate.contains_key(&14));
    }

    #[test]
    fn rebasing_starts_at_zero_and_weekly_reflects_it() {
        let mut points = vec![PricePoint::new(
            NaiveDate::from_ymd_opt(2021, 5, 31).unwrap(),
            50.0,
        )];
        points.extend(month_points(2021, 6, 10, |_| 80.0));
        let profile = build_month_profile(Month::June, &series(points));
        assert!(approx_eq(profile.weekly_return[&1], 0.0));
        assert!(approx_eq(profile.weekly_return[&2], 0.0));
    }

    #[test]
    fn degenerate_inputs_are_well_formed() {
        let empty = PriceSeries::default();
        assert_eq!(
            build_month_profile(Month::April, &empty),
            MonthProfile::empty(Month::April)
        );

        let single = series(month_points(2020, 4, 1, |_| 10.0));
        assert!(!build_month_profile(Month::April, &single).has_data());

        assert!(build_month_profile_by_number(13, &empty).is_none());
        assert!(build_month_profile_by_number(0, &empty).is_none());
        assert_eq!(build_month_profile_by_number(4, &empty).unwrap().month, 4);
    }

    #[test]
    fn profile_is_idempotent() {
        let mut points = vec![PricePoint::new(
            NaiveDate::from_ymd_opt(2019, 12, 31).unwrap(),
            100.0,
        )];
        points.extend(month_points(2020, 1, 21, |i| 100.0 + (i as f64).sin()));
        let series = series(points);
        assert_eq!(
            build_month_profile(Month::January, &series),
            build_month_profile(Month::January, &series)
        );
    }
}
