// Domain models for seasonality analysis
// These modules contain plain data independent of any rendering layer

pub mod annual_summary;
pub mod month_profile;
pub mod price_series;

// Re-export key types for convenience
pub use annual_summary::{AnnualInsights, AnnualSummary, SummaryRow, SummaryStatus};
pub use month_profile::MonthProfile;
pub use price_series::{PriceSeries, SeriesOverview};
