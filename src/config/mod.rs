//! Configuration module for the seasonality application.

pub mod analysis;

mod debug; // Private: callers go through crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod persistence;
pub mod presets;

// Re-export commonly used items
pub use analysis::SEASONALITY;
pub use persistence::{PERSISTENCE, price_cache_filename};
pub use presets::{DATE_RANGE_PRESETS, DateRangePreset, find_preset};
