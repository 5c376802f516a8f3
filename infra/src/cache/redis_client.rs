//! Redis cache client implementation
//!
//! Thin async wrapper over a `redis::Client`. Every operation acquires a
//! multiplexed connection, issues one command and returns; there is no retry
//! in the request path.

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};

use tmpl_core::services::otp::CacheServiceTrait;
use tmpl_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Redis-backed implementation of `CacheServiceTrait`
#[derive(Clone)]
pub struct RedisCache {
    client: Client,
}

impl RedisCache {
    /// Open a client for `config`; no connection is made until first use
    ///
    /// # Example
    /// ```no_run
    /// use tmpl_infra::cache::{CacheConfig, RedisCache};
    ///
    /// async fn create_cache() -> Result<RedisCache, Box<dyn std::error::Error>> {
    ///     let cache = RedisCache::new(&CacheConfig::from_env())?;
    ///     cache.ping().await?;
    ///     Ok(cache)
    /// }
    /// ```
    pub fn new(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        tracing::info!(url = %config.url(), "Creating Redis client");
        let client = Client::open(config.url()).map_err(|e| {
            tracing::error!(error = %e, "Failed to parse Redis URL");
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;
        Ok(Self { client })
    }

    /// Round-trip a `PING` to confirm the server is reachable
    pub async fn ping(&self) -> Result<(), InfrastructureError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;
        Ok(())
    }

    async fn connection(&self) -> Result<MultiplexedConnection, String> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| cache_error("connect", e))
    }
}

fn cache_error(operation: &str, err: redis::RedisError) -> String {
    tracing::error!(operation, error = %err, event = "cache_error", "Redis operation failed");
    format!("cache {} failed: {}", operation, err)
}

#[async_trait]
impl CacheServiceTrait for RedisCache {
    async fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut conn = self.connection().await?;
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(|e| cache_error("set", e))
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        let mut conn = self.connection().await?;
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(ttl_seconds)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| cache_error("set_with_ttl", e))
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let mut conn = self.connection().await?;
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| cache_error("get", e))
    }

    async fn delete(&self, key: &str) -> Result<bool, String> {
        let mut conn = self.connection().await?;
        conn.del::<_, i64>(key)
            .await
            .map(|removed| removed > 0)
            .map_err(|e| cache_error("delete", e))
    }

    async fn exists(&self, key: &str) -> Result<bool, String> {
        let mut conn = self.connection().await?;
        conn.exists::<_, bool>(key)
            .await
            .map_err(|e| cache_error("exists", e))
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, String> {
        let mut conn = self.connection().await?;
        conn.keys::<_, Vec<String>>(pattern)
            .await
            .map_err(|e| cache_error("keys", e))
    }
}
