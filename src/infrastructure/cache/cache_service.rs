//! Cache Service
//!
//! Cache trait and its Redis implementation.
//!
//! The trait works on raw string values so it can be used as a trait object
//! (`Arc<dyn Cache>`); typed JSON access lives in [`CacheExt`].
//!
//! # Example
//!
//! ```rust,ignore
//! use gym_server::infrastructure::cache::{Cache, CacheExt, RedisCache};
//!
//! let cache = RedisCache::with_prefix(redis_connection, "gym:");
//!
//! cache.set_json("post:1", &post, Some(300)).await?;
//! let post: Option<Post> = cache.get_json("post:1").await?;
//! ```

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::shared::error::AppError;

/// Key-value cache operations.
///
/// All operations are async and return `Result<T, AppError>`.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Retrieves the raw value stored at `key`.
    ///
    /// # Returns
    /// * `Ok(Some(value))` - If the key exists
    /// * `Ok(None)` - If the key does not exist
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Stores a value, expiring after `ttl_seconds` when given.
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> Result<(), AppError>;

    /// Deletes a key.
    ///
    /// # Returns
    /// * `Ok(true)` - If the key existed and was deleted
    /// * `Ok(false)` - If the key did not exist
    async fn delete(&self, key: &str) -> Result<bool, AppError>;

    /// Round-trip to the backing store.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Typed JSON helpers over any [`Cache`].
#[async_trait]
pub trait CacheExt: Cache {
    /// Reads and deserializes a JSON value.
    async fn get_json<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, AppError> {
        match self.get(key).await? {
            Some(data) => Ok(Some(deserialize(&data)?)),
            None => Ok(None),
        }
    }

    /// Serializes and stores a JSON value.
    async fn set_json<T: Serialize + Sync + Send>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: Option<u64>,
    ) -> Result<(), AppError> {
        let data = serialize(value)?;
        self.set(key, &data, ttl_seconds).await
    }
}

impl<C: Cache + ?Sized> CacheExt for C {}

fn serialize<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string(value).map_err(|e| {
        warn!("Cache serialization error: {}", e);
        AppError::Internal(format!("Cache serialization failed: {}", e))
    })
}

fn deserialize<T: DeserializeOwned>(data: &str) -> Result<T, AppError> {
    serde_json::from_str(data).map_err(|e| {
        warn!("Cache deserialization error: {}", e);
        AppError::Internal(format!("Cache deserialization failed: {}", e))
    })
}

/// Redis-backed cache implementation.
///
/// Uses a Redis ConnectionManager for connection reuse and automatic
/// reconnection handling.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
    /// Optional key prefix for namespacing
    prefix: Option<Arc<str>>,
}

impl RedisCache {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn, prefix: None }
    }

    /// Creates a RedisCache that prepends `prefix` to every key.
    ///
    /// ```rust,ignore
    /// let cache = RedisCache::with_prefix(conn, "gym:");
    /// // key "post:1" becomes "gym:post:1"
    /// ```
    pub fn with_prefix(conn: ConnectionManager, prefix: impl Into<Arc<str>>) -> Self {
        Self {
            conn,
            prefix: Some(prefix.into()),
        }
    }

    fn format_key(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, key),
            None => key.to_string(),
        }
    }
}

#[async_trait]
impl Cache for RedisCache {
    #[instrument(skip(self), level = "debug")]
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let full_key = self.format_key(key);
        let mut conn = self.conn.clone();

        let result: Option<String> = conn.get(&full_key).await?;
        debug!(key = %full_key, hit = result.is_some(), "Cache get");

        Ok(result)
    }

    #[instrument(skip(self, value), level = "debug")]
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> Result<(), AppError> {
        let full_key = self.format_key(key);
        let mut conn = self.conn.clone();

        match ttl_seconds {
            Some(seconds) => {
                let _: () = conn.set_ex(&full_key, value, seconds).await?;
                debug!(key = %full_key, ttl = seconds, "Cache set with expiry");
            }
            None => {
                let _: () = conn.set(&full_key, value).await?;
                debug!(key = %full_key, "Cache set");
            }
        }

        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete(&self, key: &str) -> Result<bool, AppError> {
        let full_key = self.format_key(key);
        let mut conn = self.conn.clone();

        let deleted: u64 = conn.del(&full_key).await?;
        let existed = deleted > 0;
        debug!(key = %full_key, deleted = existed, "Cache delete");

        Ok(existed)
    }

    async fn ping(&self) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
