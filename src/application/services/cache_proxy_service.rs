//! Cache Proxy Service
//!
//! Admin access to raw key/value entries. Client keys live under the
//! `proxy:` namespace so they can never touch internal entries.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{AccessPolicy, Actor, Capability};
use crate::infrastructure::cache::{keys, Cache};
use crate::shared::error::AppError;

#[async_trait]
pub trait CacheProxyService: Send + Sync {
    async fn get(&self, actor: &Actor, key: &str) -> Result<String, AppError>;

    async fn set(
        &self,
        actor: &Actor,
        key: &str,
        value: &str,
        expiration_minutes: Option<u64>,
    ) -> Result<(), AppError>;

    async fn delete(&self, actor: &Actor, key: &str) -> Result<(), AppError>;
}

pub struct CacheProxyServiceImpl {
    cache: Arc<dyn Cache>,
}

impl CacheProxyServiceImpl {
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl CacheProxyService for CacheProxyServiceImpl {
    async fn get(&self, actor: &Actor, key: &str) -> Result<String, AppError> {
        AccessPolicy::check(actor, Capability::ManageCache).require()?;

        self.cache
            .get(&keys::proxy(key))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Key '{}' not found", key)))
    }

    async fn set(
        &self,
        actor: &Actor,
        key: &str,
        value: &str,
        expiration_minutes: Option<u64>,
    ) -> Result<(), AppError> {
        AccessPolicy::check(actor, Capability::ManageCache).require()?;

        let ttl = expiration_minutes
            .map(|minutes| {
                minutes
                    .checked_mul(60)
                    .ok_or_else(|| AppError::validation("Expiration is too large"))
            })
            .transpose()?;
        self.cache.set(&keys::proxy(key), value, ttl).await?;

        tracing::info!(key = %key, ttl_seconds = ?ttl, "Cache entry written");
        Ok(())
    }

    /// Deleting a missing key is not an error.
    async fn delete(&self, actor: &Actor, key: &str) -> Result<(), AppError> {
        AccessPolicy::check(actor, Capability::ManageCache).require()?;

        let existed = self.cache.delete(&keys::proxy(key)).await?;
        tracing::info!(key = %key, existed, "Cache entry deleted");
        Ok(())
    }
}
