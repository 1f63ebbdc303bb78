use std::{
    collections::HashMap,
    fmt,
    sync::Mutex,
    time::{Duration, Instant},
};

use uuid::Uuid;

use tradepost_types::errors::ApplicationError;

/// Entities whose cached representation must be dropped after a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheEntity {
    Listing,
    Service,
    Offer,
    Trade,
    ServiceRun,
    Profile,
}

impl CacheEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheEntity::Listing => "listing",
            CacheEntity::Service => "service",
            CacheEntity::Offer => "offer",
            CacheEntity::Trade => "trade",
            CacheEntity::ServiceRun => "service_run",
            CacheEntity::Profile => "profile",
        }
    }
}

impl fmt::Display for CacheEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn cache_key(kind: CacheEntity, id: Uuid) -> String {
    format!("tradepost:{}:{}", kind, id)
}

/// Key-value cache the marketplace writes through to.
#[async_trait::async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, ApplicationError>;

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), ApplicationError>;

    async fn delete(&self, key: &str) -> Result<(), ApplicationError>;

    /// Drops the cached entry for an entity.
    async fn invalidate(&self, kind: CacheEntity, id: Uuid) -> Result<(), ApplicationError> {
        self.delete(&cache_key(kind, id)).await
    }
}

/// Cache used when caching is disabled. Every call succeeds and stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

#[async_trait::async_trait]
impl CacheStore for NoopCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, ApplicationError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<(), ApplicationError> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<(), ApplicationError> {
        Ok(())
    }
}

/// Process-local cache with per-entry expiry, for single-node deployments.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CacheStore for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, ApplicationError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some((value, expires_at)) if *expires_at > Instant::now() => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), ApplicationError> {
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        // keys that are never read again would otherwise stay forever
        entries.retain(|_, (_, expires_at)| *expires_at > now);
        entries.insert(key.to_string(), (value, now + ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), ApplicationError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_format() {
        let id = Uuid::new_v4();
        assert_eq!(
            cache_key(CacheEntity::ServiceRun, id),
            format!("tradepost:service_run:{}", id)
        );
    }

    #[tokio::test]
    async fn test_noop_cache_accepts_everything() {
        let cache = NoopCache;
        cache
            .set("k", "v".to_string(), Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
        cache
            .invalidate(CacheEntity::Listing, Uuid::new_v4())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_in_memory_cache_invalidate() {
        let cache = InMemoryCache::new();
        let id = Uuid::new_v4();
        let key = cache_key(CacheEntity::Trade, id);

        cache
            .set(&key, "cached".to_string(), Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get(&key).await.unwrap().as_deref(), Some("cached"));

        cache.invalidate(CacheEntity::Trade, id).await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_in_memory_cache_expiry() {
        let cache = InMemoryCache::new();
        cache
            .set("short", "v".to_string(), Duration::ZERO)
            .await
            .unwrap();
        assert_eq!(cache.get("short").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_in_memory_cache_sweeps_expired_on_set() {
        let cache = InMemoryCache::new();
        for key in ["a", "b", "c"] {
            cache
                .set(key, "v".to_string(), Duration::ZERO)
                .await
                .unwrap();
        }
        cache
            .set("fresh", "v".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        let entries = cache.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries.contains_key("fresh"));
    }
}
