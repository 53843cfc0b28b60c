use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::models::month_profile::MonthProfile;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SummaryStatus {
    #[strum(to_string = "ok")]
    Ok,
    #[strum(to_string = "insufficient data")]
    InsufficientData,
}

/// One row of the annual table. Metrics are `None` when the month had no
/// qualifying year, so "no data" never reads as a 0% month.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub month: u32,
    pub month_name: String,
    pub status: SummaryStatus,
    /// Max over the month's weekly means (percent)
    pub peak_weekly_return: Option<f64>,
    /// Mean of the per-day momentum values (percent)
    pub mean_momentum: Option<f64>,
    /// Mean of the per-day win rates (percent)
    pub mean_win_rate: Option<f64>,
    /// Number of qualifying years
    pub years: usize,
}

impl SummaryRow {
    pub fn from_profile(profile: &MonthProfile) -> Self {
        let month_name = profile.month_name().to_string();

        if !profile.has_data() {
            return SummaryRow {
                month: profile.month,
                month_name,
                status: SummaryStatus::InsufficientData,
                peak_weekly_return: None,
                mean_momentum: None,
                mean_win_rate: None,
                years: 0,
            };
        }

        SummaryRow {
            month: profile.month,
            month_name,
            status: SummaryStatus::Ok,
            peak_weekly_return: profile.peak_weekly_return(),
            mean_momentum: profile.mean_momentum(),
            mean_win_rate: profile.mean_win_rate(),
            years: profile.years.len(),
        }
    }

    pub fn has_data(&self) -> bool {
        self.status == SummaryStatus::Ok
    }
}

/// Highlights across the months that have data.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AnnualInsights {
    pub best_month: Option<u32>,
    pub worst_month: Option<u32>,
    pub most_reliable_month: Option<u32>,
}

/// Ordered 12-row table, January first.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AnnualSummary {
    pub rows: Vec<SummaryRow>,
}

impl AnnualSummary {
    pub fn rows_with_data(&self) -> impl Iterator<Item = &SummaryRow> {
        self.rows.iter().filter(|row| row.has_data())
    }

    /// Best/worst month by peak weekly return, most reliable by mean win rate.
    /// Ties go to the earliest month.
    pub fn insights(&self) -> AnnualInsights {
        AnnualInsights {
            best_month: self.extreme_month(|row| row.peak_weekly_return, |cand, best| cand > best),
            worst_month: self.extreme_month(|row| row.peak_weekly_return, |cand, best| cand < best),
            most_reliable_month: self.extreme_month(|row| row.mean_win_rate, |cand, best| cand > best),
        }
    }

    fn extreme_month(
        &self,
        metric: impl Fn(&SummaryRow) -> Option<f64>,
        beats: impl Fn(f64, f64) -> bool,
    ) -> Option<u32> {
        let mut best: Option<(u32, f64)> = None;
        for row in self.rows_with_data() {
            let Some(value) = metric(row) else {
                continue;
            };
            match best {
                Some((_, best_value)) if !beats(value, best_value) => {}
                _ => best = Some((row.month, value)),
            }
        }
        best.map(|(month, _)| month)
    }
}
