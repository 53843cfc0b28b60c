//! Read-only interpretations of a finished `MonthProfile`.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::config::SEASONALITY;
use crate::models::MonthProfile;
use crate::utils::maths_utils::{linear_slope, mean, pearson_correlation};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum MomentumTrend {
    Accelerating,
    Decelerating,
    Stable,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum WinRateBand {
    Strong,
    Moderate,
    Weak,
}

impl WinRateBand {
    pub fn classify(win_rate_pct: f64) -> Self {
        let cfg = &SEASONALITY.insights;
        if win_rate_pct >= cfg.win_rate_strong_pct {
            WinRateBand::Strong
        } else if win_rate_pct >= cfg.win_rate_break_even_pct {
            WinRateBand::Moderate
        } else {
            WinRateBand::Weak
        }
    }
}

/// Win rate of the first and second half of the month.
/// The split is at `max_day / 2`; the first half includes the split day.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct HalfSplit {
    pub mid_day: u32,
    pub last_day: u32,
    pub first_half_win_rate: Option<f64>,
    pub second_half_win_rate: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MonthInsights {
    pub best_week: Option<usize>,
    pub peak_return: Option<f64>,
    pub mean_momentum: Option<f64>,
    pub momentum_trend: MomentumTrend,
    pub momentum_slope: Option<f64>,
    pub mean_win_rate: Option<f64>,
    pub win_rate_grade: Option<WinRateBand>,
    pub half_split: Option<HalfSplit>,
}

/// Week with the highest mean return. Ties go to the earliest week.
pub fn best_week(profile: &MonthProfile) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (&week, &value) in &profile.weekly_return {
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((week, value)),
        }
    }
    best.map(|(week, _)| week)
}

fn momentum_points(profile: &MonthProfile) -> Option<(Vec<f64>, Vec<f64>)> {
    if profile.momentum.len() <= SEASONALITY.insights.min_trend_days {
        return None;
    }
    Some(
        profile
            .momentum
            .iter()
            .map(|(&day, &value)| (f64::from(day), value))
            .unzip(),
    )
}

pub fn momentum_trend(profile: &MonthProfile) -> MomentumTrend {
    let threshold = SEASONALITY.insights.trend_correlation_threshold;
    let correlation =
        momentum_points(profile).and_then(|(days, values)| pearson_correlation(&days, &values));
    match correlation {
        Some(c) if c > threshold => MomentumTrend::Accelerating,
        Some(c) if c < -threshold => MomentumTrend::Decelerating,
        _ => MomentumTrend::Stable,
    }
}

/// Least-squares slope of momentum against calendar day (percent per day).
pub fn momentum_slope(profile: &MonthProfile) -> Option<f64> {
    let (days, values) = momentum_points(profile)?;
    linear_slope(&days, &values)
}

pub fn half_split(profile: &MonthProfile) -> Option<HalfSplit> {
    let last_day = *profile.win_rate.keys().next_back()?;
    let mid_day = last_day / 2;

    let (first, second): (Vec<_>, Vec<_>) = profile
        .win_rate
        .iter()
        .partition(|(day, _)| **day <= mid_day);
    let rates = |half: Vec<(&u32, &f64)>| half.into_iter().map(|(_, rate)| *rate).collect::<Vec<_>>();

    Some(HalfSplit {
        mid_day,
        last_day,
        first_half_win_rate: mean(&rates(first)),
        second_half_win_rate: mean(&rates(second)),
    })
}

pub fn month_insights(profile: &MonthProfile) -> MonthInsights {
    let mean_win_rate = profile.mean_win_rate();
    MonthInsights {
        best_week: best_week(profile),
        peak_return: profile.peak_weekly_return(),
        mean_momentum: profile.mean_momentum(),
        momentum_trend: momentum_trend(profile),
        momentum_slope: momentum_slope(profile),
        mean_win_rate,
        win_rate_grade: mean_win_rate.map(WinRateBand::classify),
        half_split: half_split(profile),
    }
}
