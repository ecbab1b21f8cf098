use async_trait::async_trait;
use std::time::Duration;

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] ::redis::RedisError),

    #[error("Cache backend error: {0}")]
    Backend(String),
}

/// An expiring string key-value store.
///
/// `get` returns `Ok(None)` for a missing or expired key; `Err` is reserved
/// for the store itself being unreachable.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration)
    -> Result<(), CacheError>;

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}
