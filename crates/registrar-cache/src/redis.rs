//! Redis-backed [`TokenStore`].

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, error, instrument};

use crate::store::{CacheError, TokenStore};

/// Redis client with a reconnecting connection manager.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache").finish_non_exhaustive()
    }
}

impl RedisCache {
    /// Connects to Redis.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Connection` if the URL is invalid or the server
    /// cannot be reached.
    pub async fn new(redis_url: &str) -> Result<Self, CacheError> {
        let client = Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl TokenStore for RedisCache {
    #[instrument(skip(self, value), fields(cache.operation = "SETEX"))]
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();

        conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))
            .await
            .inspect_err(|e| error!(cache.key = %key, error = %e, "Redis SETEX error"))?;

        debug!(cache.key = %key, cache.ttl_secs = %ttl.as_secs(), "Cache set");

        Ok(())
    }

    #[instrument(skip(self), fields(cache.operation = "GET"))]
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();

        let value = conn
            .get::<_, Option<String>>(key)
            .await
            .inspect_err(|e| error!(cache.key = %key, error = %e, "Redis GET error"))?;

        match &value {
            Some(_) => debug!(cache.key = %key, "Cache hit"),
            None => debug!(cache.key = %key, "Cache miss"),
        }

        Ok(value)
    }

    #[instrument(skip(self), fields(cache.operation = "DEL"))]
    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();

        conn.del::<_, ()>(key).await?;

        debug!(cache.key = %key, "Cache key deleted");

        Ok(())
    }
}
