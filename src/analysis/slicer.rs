use std::collections::BTreeMap;

use chrono::Month;
use itertools::Itertools;

use crate::config::SEASONALITY;
#[allow(unused_imports)]
use crate::config::DEBUG_FLAGS;
use crate::domain::DailyObservation;

/// All valid observations of one (year, month), date-ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct YearMonthSlice {
    pub year: i32,
    pub month: u32,
    pub observations: Vec<DailyObservation>,
}

impl YearMonthSlice {
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

pub fn qualifies(observation_count: usize) -> bool {
    observation_count >= SEASONALITY.slicing.min_observations_per_slice
}

/// Partition the series into per-year slices of `month`, keeping only slices
/// with enough valid observations. Empty input gives an empty map.
pub fn slice_month(
    observations: &[DailyObservation],
    month: Month,
) -> BTreeMap<i32, YearMonthSlice> {
    let target = month.number_from_month();

    observations
        .iter()
        .filter(|obs| obs.month() == target && obs.is_valid())
        .copied()
        .into_group_map_by(|obs| obs.year())
        .into_iter()
        .filter_map(|(year, mut rows)| {
            let keep = qualifies(rows.len());

            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_slice_qualification {
                log::debug!(
                    "{} {}: {} valid observations -> {}",
                    month.name(),
                    year,
                    rows.len(),
                    if keep { "qualifies" } else { "dropped" }
                );
            }

            if !keep {
                return None;
            }
            rows.sort_by_key(|obs| obs.date);
            Some((
                year,
                YearMonthSlice {
                    year,
                    month: target,
                    observations: rows,
                },
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(y: i32, m: u32, d: u32, ret: Option<f64>) -> DailyObservation {
        DailyObservation {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            close: 100.0,
            daily_return: ret,
        }
    }

    fn month_of(y: i32, m: u32, days: u32) -> Vec<DailyObservation> {
        (1..=days).map(|d| obs(y, m, d, Some(0.001))).collect()
    }

    #[test]
    fn nine_observations_drop_ten_qualify() {
        let mut series = month_of(2019, 1, 9);
        series.extend(month_of(2020, 1, 10));

        let slices = slice_month(&series, Month::January);
        assert_eq!(slices.keys().copied().collect::<Vec<_>>(), vec![2020]);
        assert_eq!(slices[&2020].len(), 10);
    }

    #[test]
    fn missing_returns_do_not_count_towards_threshold() {
        let mut series = month_of(2020, 1, 10);
        series[0].daily_return = None;

        assert!(slice_month(&series, Month::January).is_empty());
    }

    #[test]
    fn other_months_are_ignored_and_output_is_sorted() {
        let mut series = month_of(2020, 2, 12);
        series.reverse();
        series.extend(month_of(2020, 3, 15));

        let slices = slice_month(&series, Month::February);
        let slice = &slices[&2020];
        assert_eq!(slice.month, 2);
        assert_eq!(slice.len(), 12);
        assert!(slice.observations.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn empty_input_gives_empty_map() {
        assert!(slice_month(&[], Month::June).is_empty());
    }
}
