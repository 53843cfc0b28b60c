// Data loading and caching
pub mod cache_file;
pub mod json_file;
pub mod pre_main_async;
pub mod provider;

// Re-export commonly used types
pub use cache_file::{CacheFile, CacheProvider, write_price_cache_async};
pub use json_file::{JsonFileProvider, read_price_points};
pub use pre_main_async::fetch_price_series;
pub use provider::{PriceFetch, PriceRequest, PriceSeriesProvider, get_price_series_async};
