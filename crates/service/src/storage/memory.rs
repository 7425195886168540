use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::storage::DocumentCache;

/// In-memory document cache.
///
/// The non-cache-backed variant of the store: a process-local map behind the
/// same `DocumentCache` interface the Redis implementation exposes. Used by
/// the test suites and usable for cache-less local runs.
#[derive(Clone, Default)]
pub struct MemoryCache {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.get(key).cloned())
    }

    async fn put(&self, key: &str, body: String) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        map.insert(key.to_string(), body);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, ServiceError> {
        let mut map = self.inner.write().await;
        Ok(map.remove(key).is_some())
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.keys().filter(|k| k.starts_with(prefix)).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_cache_crud() {
        let cache = MemoryCache::new();

        assert_eq!(cache.get("voter:1").await.unwrap(), None);

        cache.put("voter:1", "{}".into()).await.unwrap();
        cache.put("voter:2", "{}".into()).await.unwrap();
        cache.put("poll:1", "{}".into()).await.unwrap();
        assert_eq!(cache.get("voter:1").await.unwrap().as_deref(), Some("{}"));

        let mut keys = cache.keys("voter:").await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["voter:1", "voter:2"]);

        assert!(cache.remove("voter:1").await.unwrap());
        assert!(!cache.remove("voter:1").await.unwrap());
        assert_eq!(cache.get("voter:1").await.unwrap(), None);
    }
}
