// Domain types and value objects
pub mod date_range;
pub mod observation;

// Re-export commonly used types
pub use date_range::DateRange;
pub use observation::{DailyObservation, PricePoint};
