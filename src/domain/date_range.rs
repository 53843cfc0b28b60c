use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::DateRangePreset;
use crate::utils::time_utils::parse_date;

/// Half-open `[start, end)` calendar range, the way the price download treats it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end <= start {
            bail!("Invalid date range: end {} is not after start {}", end, start);
        }
        Ok(DateRange { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn from_preset(preset: &DateRangePreset) -> Result<Self> {
        Self::parse(preset.start, preset.end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::find_preset;

    #[test]
    fn range_is_half_open() {
        let range = DateRange::parse("2020-01-01", "2020-02-01").unwrap();
        assert!(range.contains(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()));
        assert!(range.contains(NaiveDate::from_ymd_opt(2020, 1, 31).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2020, 2, 1).unwrap()));
    }

    #[test]
    fn inverted_range_is_an_error() {
        assert!(DateRange::parse("2020-02-01", "2020-01-01").is_err());
        assert!(DateRange::parse("2020-01-01", "2020-01-01").is_err());
    }

    #[test]
    fn presets_parse() {
        let preset = find_preset("Last 5 Years").unwrap();
        let range = DateRange::from_preset(preset).unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2019, 1, 1).unwrap());
    }
}
