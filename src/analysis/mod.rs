// Seasonality pipeline: series -> slices -> per-slice features -> per-month aggregates -> annual table
pub mod aggregators;
pub mod annual_summary;
pub mod features;
pub mod insights;
pub mod month_profile;
pub mod slicer;

// Re-export commonly used items
pub use annual_summary::{ALL_MONTHS, build_all_profiles, build_annual_summary};
pub use insights::{MomentumTrend, MonthInsights, WinRateBand, month_insights};
pub use month_profile::{build_month_profile, build_month_profile_by_number};
