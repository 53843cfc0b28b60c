use std::collections::BTreeMap;

use crate::analysis::features::DerivedSlice;
use crate::config::SEASONALITY;

/// Grouped running mean: key -> (sum, count), reduced at the end.
/// A key only exists once something was added to it, so no mean is ever
/// taken over zero contributors.
#[derive(Debug, Clone)]
pub struct MeanAccumulator<K: Ord> {
    buckets: BTreeMap<K, (f64, usize)>,
}

impl<K: Ord> Default for MeanAccumulator<K> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }
}

impl<K: Ord> MeanAccumulator<K> {
    pub fn add(&mut self, key: K, value: f64) {
        let (sum, count) = self.buckets.entry(key).or_insert((0.0, 0));
        *sum += value;
        *count += 1;
    }

    #[cfg(test)]
    fn contributors(&self, key: &K) -> usize {
        self.buckets.get(key).map_or(0, |(_, count)| *count)
    }

    /// Means scaled to percent.
    pub fn into_percent_means(self) -> BTreeMap<K, f64> {
        self.buckets
            .into_iter()
            .map(|(key, (sum, count))| (key, sum / count as f64 * 100.0))
            .collect()
    }
}

/// Week -> mean (percent) of each year's last `month_return` in that week.
/// Only weeks 1..=4 are tracked.
pub fn weekly_return(slices: &[DerivedSlice]) -> BTreeMap<usize, f64> {
    let mut acc = MeanAccumulator::default();
    for slice in slices {
        for week in 1..=SEASONALITY.features.tracked_weeks {
            if let Some(last) = slice.rows.iter().rev().find(|row| row.trading_week == week) {
                acc.add(week, last.month_return);
            }
        }
    }
    acc.into_percent_means()
}

/// Calendar day -> mean (percent) of the defined, finite rolling momentum values.
pub fn momentum_by_day(slices: &[DerivedSlice]) -> BTreeMap<u32, f64> {
    let mut acc = MeanAccumulator::default();
    for slice in slices
        .iter()
        .filter(|slice| slice.len() >= SEASONALITY.features.momentum_window)
    {
        for row in &slice.rows {
            if let Some(momentum) = row.rolling_momentum.filter(|m| m.is_finite()) {
                acc.add(row.day_of_month, momentum);
            }
        }
    }
    acc.into_percent_means()
}

/// Calendar day -> percent of years whose return on that day was positive.
pub fn win_rate_by_day(slices: &[DerivedSlice]) -> BTreeMap<u32, f64> {
    let mut acc = MeanAccumulator::default();
    for slice in slices {
        for row in slice.rows.iter().filter(|row| row.daily_return.is_finite()) {
            acc.add(row.day_of_month, if row.is_win { 1.0 } else { 0.0 });
        }
    }
    acc.into_percent_means()
}
