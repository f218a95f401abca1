//! Cache Module
//!
//! Redis connection management and caching utilities.
//!
//! ```text
//! +-------------------+
//! |   Application     |
//! +-------------------+
//!          |
//!          v
//! +-------------------+
//! |   Cache Trait     |  <-- Abstract interface
//! +-------------------+
//!          |
//!          v
//! +-------------------+
//! |   RedisCache      |  <-- Concrete implementation
//! +-------------------+
//!          |
//!          v
//! +-------------------+
//! | ConnectionManager |
//! +-------------------+
//! ```

mod cache_service;

pub use cache_service::{Cache, CacheExt, RedisCache};

use redis::aio::ConnectionManager;
use redis::Client;
use tracing::{info, instrument};

use crate::config::RedisSettings;

/// Creates a Redis connection manager with automatic reconnection.
#[instrument(skip(settings), fields(url = %settings.url))]
pub async fn create_redis_client(
    settings: &RedisSettings,
) -> Result<ConnectionManager, redis::RedisError> {
    info!("Connecting to Redis...");
    let client = Client::open(settings.url.as_str())?;
    let manager = ConnectionManager::new(client).await?;
    info!("Redis connection established");
    Ok(manager)
}

/// Creates a `RedisCache` namespaced with `settings.key_prefix`.
pub async fn create_redis_cache(settings: &RedisSettings) -> Result<RedisCache, redis::RedisError> {
    let conn = create_redis_client(settings).await?;
    Ok(RedisCache::with_prefix(conn, settings.key_prefix.as_str()))
}

/// Cache key prefixes.
///
/// Use these helpers to keep key naming consistent across the application.
pub mod keys {
    /// Prefix for cached posts (e.g., "post:42")
    pub const POST: &str = "post:";

    /// Prefix for keys written through the admin cache proxy
    pub const PROXY: &str = "proxy:";

    /// Cache key of a single post
    #[inline]
    pub fn post(post_id: impl std::fmt::Display) -> String {
        format!("{}{}", POST, post_id)
    }

    /// Namespaced key for a client-supplied proxy key
    #[inline]
    pub fn proxy(key: &str) -> String {
        format!("{}{}", PROXY, key)
    }

}
