use std::collections::BTreeSet;

use anyhow::{Result, bail};
use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::domain::{DailyObservation, PricePoint};

// ============================================================================
// PriceSeries: the full daily series the seasonality core consumes
// ============================================================================

/// Immutable, date-ascending daily series with returns already derived.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    pub symbol: String,
    pub observations: Vec<DailyObservation>,
}

/// Dataset-level facts about a series (date span, size, coverage).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SeriesOverview {
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub total_days: usize,
    pub years_covered: usize,
    /// Observations with a defined daily return
    pub return_points: usize,
}

impl PriceSeries {
    /// Sort the raw points by date, validate them and compute
    /// `daily_return[t] = close[t] / close[t-1] - 1` (undefined for the first point).
    pub fn from_points(symbol: impl Into<String>, mut points: Vec<PricePoint>) -> Result<Self> {
        let symbol = symbol.into();

        if let Some(bad) = points.iter().find(|p| !p.has_valid_close()) {
            bail!(
                "Invalid close {} on {} for {}: closes must be positive and finite",
                bad.close,
                bad.date,
                symbol
            );
        }

        points.sort_by_key(|p| p.date);

        if let Some((a, _)) = points.iter().tuple_windows().find(|(a, b)| a.date == b.date) {
            bail!("Duplicate date {} in price series for {}", a.date, symbol);
        }

        let first = points.first().map(|p| DailyObservation {
            date: p.date,
            close: p.close,
            daily_return: None,
        });

        let observations = first
            .into_iter()
            .chain(
                points
                    .iter()
                    .tuple_windows()
                    .map(|(prev, curr)| DailyObservation {
                        date: curr.date,
                        close: curr.close,
                        daily_return: Some(curr.close / prev.close - 1.0),
                    }),
            )
            .collect();

        Ok(PriceSeries {
            symbol,
            observations,
        })
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn overview(&self) -> SeriesOverview {
        SeriesOverview {
            first_date: self.observations.first().map(|o| o.date),
            last_date: self.observations.last().map(|o| o.date),
            total_days: self.observations.len(),
            years_covered: self
                .observations
                .iter()
                .map(|o| o.date.year())
                .collect::<BTreeSet<_>>()
                .len(),
            return_points: self
                .observations
                .iter()
                .filter(|o| o.daily_return.is_some())
                .count(),
        }
    }
}
