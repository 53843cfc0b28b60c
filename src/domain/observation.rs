use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One raw `(date, close)` pair as delivered by a price provider.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        PricePoint { date, close }
    }

    pub fn has_valid_close(&self) -> bool {
        self.close.is_finite() && self.close > 0.0
    }
}

/// One trading day of the full series.
/// `daily_return` is `None` only for the very first observation of the series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub close: f64,
    pub daily_return: Option<f64>,
}

impl DailyObservation {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day_of_month(&self) -> u32 {
        self.date.day()
    }

    // Both close and return must be usable for the observation to enter a slice
    pub fn is_valid(&self) -> bool {
        self.close.is_finite() && self.daily_return.is_some_and(f64::is_finite)
    }
}
