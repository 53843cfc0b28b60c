use std::collections::BTreeMap;

use chrono::Month;
use serde::{Deserialize, Serialize};

use crate::utils::maths_utils::mean;

/// Seasonality profile of one calendar month, aggregated over every qualifying year.
///
/// Keys with no contributing year are absent from the maps. `years` being empty
/// means "insufficient data for this month", not "flat month".
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MonthProfile {
    /// Calendar month number, 1 = January
    pub month: u32,
    /// Trading week (1..=4) -> mean cumulative return at the end of that week (percent)
    pub weekly_return: BTreeMap<usize, f64>,
    /// Calendar day -> mean centered 3-day momentum (percent)
    pub momentum: BTreeMap<u32, f64>,
    /// Calendar day -> share of years that closed positive on that day (percent)
    pub win_rate: BTreeMap<u32, f64>,
    /// Qualifying years, ascending
    pub years: Vec<i32>,
}

impl MonthProfile {
    pub fn empty(month: Month) -> Self {
        MonthProfile {
            month: month.number_from_month(),
            ..Default::default()
        }
    }

    pub fn has_data(&self) -> bool {
        !self.years.is_empty()
    }

    pub fn month_name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("Unknown")
    }

    /// First and last qualifying year.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        Some((*self.years.first()?, *self.years.last()?))
    }

    /// Highest weekly figure, used as the month's typical total return.
    pub fn peak_weekly_return(&self) -> Option<f64> {
        self.weekly_return.values().copied().reduce(f64::max)
    }

    pub fn mean_momentum(&self) -> Option<f64> {
        mean(&self.momentum.values().copied().collect::<Vec<_>>())
    }

    pub fn mean_win_rate(&self) -> Option<f64> {
        mean(&self.win_rate.values().copied().collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_profile_has_no_aggregates() {
        let profile = MonthProfile::empty(Month::March);
        assert_eq!(profile.month, 3);
        assert_eq!(profile.month_name(), "March");
        assert!(!profile.has_data());
        assert_eq!(profile.year_span(), None);
        assert_eq!(profile.peak_weekly_return(), None);
        assert_eq!(profile.mean_momentum(), None);
        assert_eq!(profile.mean_win_rate(), None);
    }

    #[test]
    fn peak_uses_highest_week_not_last_week() {
        let profile = MonthProfile {
            month: 1,
            weekly_return: BTreeMap::from([(1, 0.5), (2, 2.5), (3, 1.0), (4, -0.5)]),
            years: vec![2019, 2020],
            ..Default::default()
        };
        assert_eq!(profile.peak_weekly_return(), Some(2.5));
        assert_eq!(profile.year_span(), Some((2019, 2020)));
    }
}
