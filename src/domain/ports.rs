use crate::utils::error::Result;
use async_trait::async_trait;

/// Where the raw index document comes from. Implementations live under
/// `adapters`: a local file reader and an HTTP client.
#[async_trait]
pub trait IndexSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<u8>>;

    /// Human-readable location, for log lines only.
    fn location(&self) -> &str;
}

/// Resolved runtime settings, whatever layer they came from (CLI flags,
/// TOML file, defaults).
pub trait ConfigProvider: Send + Sync {
    fn index_location(&self) -> &str;
    fn suggestion_limit(&self) -> usize;
    fn similar_limit(&self) -> usize;
    fn cache_enabled(&self) -> bool;
}
