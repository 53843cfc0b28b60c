//! File persistence and serialization configuration

/// Configuration for the local price cache
pub struct PriceCacheConfig {
    /// Directory path for storing cached price series
    pub directory: &'static str,
    /// Base filename for cache files (without extension)
    pub filename_stem: &'static str,
    /// Current version of the cache serialization format
    pub version: f64,
    /// Maximum age of a cache file before it is considered stale (seconds)
    pub acceptable_age_secs: i64,
}

pub struct PersistenceConfig {
    pub price_cache: PriceCacheConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    price_cache: PriceCacheConfig {
        directory: "price_data",
        filename_stem: "prices",
        version: 1.0,
        acceptable_age_secs: 60 * 60 * 24,
    },
};

/// Generate symbol-specific cache filename
/// Example: "prices_GSPC_v1.bin" for `^GSPC`
pub fn price_cache_filename(symbol: &str) -> String {
    let safe_symbol: String = symbol
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    format!(
        "{}_{}_v{}.bin",
        PERSISTENCE.price_cache.filename_stem, safe_symbol, PERSISTENCE.price_cache.version
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_filename_strips_symbol_punctuation() {
        assert_eq!(price_cache_filename("^GSPC"), "prices_GSPC_v1.bin");
        assert_eq!(price_cache_filename("BTC-USD"), "prices_BTC-USD_v1.bin");
    }
}
