//! Analysis and computation configuration

/// Settings for slicing a daily series into (year, month) slices
pub struct SliceSettings {
    // Minimum number of valid observations a (year, month) slice needs to qualify.
    // Below this threshold the slice is dropped before any feature is derived.
    pub min_observations_per_slice: usize,
}

/// Settings for the per-slice feature derivation
pub struct FeatureSettings {
    // Trading days grouped into one trading week
    pub trading_days_per_week: usize,
    // Only weeks 1..=tracked_weeks are collected by the weekly aggregator
    pub tracked_weeks: usize,
    // Width of the centered rolling window used for momentum (must be odd)
    pub momentum_window: usize,
}

/// Settings for the insights derived from a finished month profile
pub struct InsightSettings {
    // Momentum trend needs strictly more than this many days
    pub min_trend_days: usize,
    // |correlation| above this marks accelerating/decelerating momentum
    pub trend_correlation_threshold: f64,
    // Win rate (percent) at or above which a day/month counts as strong
    pub win_rate_strong_pct: f64,
    // Win rate (percent) at or above which a day/month is at least break-even
    pub win_rate_break_even_pct: f64,
}

/// The Master Seasonality Configuration
pub struct SeasonalityConfig {
    pub slicing: SliceSettings,
    pub features: FeatureSettings,
    pub insights: InsightSettings,
}

pub const SEASONALITY: SeasonalityConfig = SeasonalityConfig {
    slicing: SliceSettings {
        min_observations_per_slice: 10,
    },

    features: FeatureSettings {
        trading_days_per_week: 5,
        tracked_weeks: 4,
        momentum_window: 3,
    },

    insights: InsightSettings {
        min_trend_days: 5,
        trend_correlation_threshold: 0.1,
        win_rate_strong_pct: 55.0,
        win_rate_break_even_pct: 50.0,
    },
};
