//! Cache abstraction shared by the entity stores.
//!
//! Each entity lives as one JSON document under a `<prefix><id>` key. The
//! `DocumentCache` trait hides which backend holds the documents: the
//! Redis-backed implementation is what the services run against, the
//! in-memory one backs the tests.

use std::{marker::PhantomData, sync::Arc};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::ServiceError;

pub mod memory;
pub mod redis_cache;

pub use memory::MemoryCache;
pub use redis_cache::RedisCache;

pub type CacheHandle = Arc<dyn DocumentCache>;

/// Raw key-value access to JSON documents.
#[async_trait]
pub trait DocumentCache: Send + Sync {
    /// Fetch the document stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, ServiceError>;

    /// Store `body` under `key`, replacing any previous document whole.
    async fn put(&self, key: &str, body: String) -> Result<(), ServiceError>;

    /// Remove the document under `key`; returns whether it existed.
    async fn remove(&self, key: &str) -> Result<bool, ServiceError>;

    /// Enumerate keys starting with `prefix`. Order is unspecified.
    async fn keys(&self, prefix: &str) -> Result<Vec<String>, ServiceError>;
}

/// Typed, prefix-keyed document collection for one entity type.
pub struct Documents<T> {
    cache: CacheHandle,
    prefix: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Documents<T> {
    fn clone(&self) -> Self {
        Self { cache: Arc::clone(&self.cache), prefix: self.prefix, _marker: PhantomData }
    }
}

impl<T> Documents<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(cache: CacheHandle, prefix: &'static str) -> Self {
        Self { cache, prefix, _marker: PhantomData }
    }

    fn key(&self, id: u32) -> String {
        format!("{}{}", self.prefix, id)
    }

    fn entity(&self) -> &'static str {
        self.prefix.trim_end_matches(':')
    }

    fn encode(&self, value: &T) -> Result<String, ServiceError> {
        serde_json::to_string(value).map_err(|e| ServiceError::Cache(e.to_string()))
    }

    fn decode(&self, body: &str) -> Result<T, ServiceError> {
        serde_json::from_str(body).map_err(|e| ServiceError::Cache(e.to_string()))
    }

    /// Store a new document; fails if one already exists for this id.
    pub async fn insert(&self, id: u32, value: &T) -> Result<(), ServiceError> {
        let key = self.key(id);
        if self.cache.get(&key).await?.is_some() {
            return Err(ServiceError::already_exists(self.entity(), id));
        }
        self.cache.put(&key, self.encode(value)?).await
    }

    /// Decoded copy of the document for this id.
    pub async fn fetch(&self, id: u32) -> Result<T, ServiceError> {
        let key = self.key(id);
        match self.cache.get(&key).await? {
            Some(body) => self.decode(&body),
            None => Err(ServiceError::not_found(self.entity(), id)),
        }
    }

    /// All documents under this prefix, in enumeration order. A decode
    /// failure on any key aborts the whole listing.
    pub async fn list(&self) -> Result<Vec<T>, ServiceError> {
        let keys = self.cache.keys(self.prefix).await?;
        let mut items = Vec::with_capacity(keys.len());
        for key in keys {
            // A key can vanish between the scan and the read; skip it.
            if let Some(body) = self.cache.get(&key).await? {
                items.push(self.decode(&body)?);
            }
        }
        Ok(items)
    }

    /// Overwrite the document for an existing id.
    pub async fn replace(&self, id: u32, value: &T) -> Result<(), ServiceError> {
        let key = self.key(id);
        if self.cache.get(&key).await?.is_none() {
            return Err(ServiceError::not_found(self.entity(), id));
        }
        self.cache.put(&key, self.encode(value)?).await
    }

    pub async fn delete(&self, id: u32) -> Result<(), ServiceError> {
        if !self.cache.remove(&self.key(id)).await? {
            return Err(ServiceError::not_found(self.entity(), id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        id: u32,
        label: String,
    }

    fn docs() -> Documents<Doc> {
        Documents::new(Arc::new(MemoryCache::new()), "doc:")
    }

    #[tokio::test]
    async fn insert_then_fetch_round_trips() {
        let docs = docs();
        let doc = Doc { id: 3, label: "three".into() };
        docs.insert(3, &doc).await.unwrap();
        assert_eq!(docs.fetch(3).await.unwrap(), doc);
    }

    #[tokio::test]
    async fn duplicate_insert_leaves_original_untouched() {
        let docs = docs();
        let original = Doc { id: 3, label: "first".into() };
        docs.insert(3, &original).await.unwrap();

        let dup = Doc { id: 3, label: "second".into() };
        assert!(matches!(
            docs.insert(3, &dup).await,
            Err(ServiceError::AlreadyExists(_))
        ));
        assert_eq!(docs.fetch(3).await.unwrap(), original);
    }

    #[tokio::test]
    async fn missing_id_is_not_found() {
        let docs = docs();
        assert!(matches!(docs.fetch(9).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(
            docs.replace(9, &Doc { id: 9, label: "x".into() }).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(docs.delete(9).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_returns_every_inserted_document() {
        let docs = docs();
        for id in 1..=4 {
            docs.insert(id, &Doc { id, label: format!("doc {id}") }).await.unwrap();
        }
        let mut ids: Vec<u32> = docs.list().await.unwrap().iter().map(|d| d.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn corrupt_document_aborts_the_listing() {
        let cache: CacheHandle = Arc::new(MemoryCache::new());
        let docs: Documents<Doc> = Documents::new(Arc::clone(&cache), "doc:");
        docs.insert(1, &Doc { id: 1, label: "one".into() }).await.unwrap();
        cache.put("doc:2", "{not json".into()).await.unwrap();

        assert!(matches!(docs.list().await, Err(ServiceError::Cache(_))));
    }

    #[tokio::test]
    async fn prefixes_do_not_leak_between_collections() {
        let cache: CacheHandle = Arc::new(MemoryCache::new());
        let a: Documents<Doc> = Documents::new(Arc::clone(&cache), "a:");
        let b: Documents<Doc> = Documents::new(Arc::clone(&cache), "b:");

        a.insert(1, &Doc { id: 1, label: "a1".into() }).await.unwrap();
        b.insert(1, &Doc { id: 1, label: "b1".into() }).await.unwrap();

        assert_eq!(a.list().await.unwrap().len(), 1);
        assert_eq!(a.fetch(1).await.unwrap().label, "a1");
        assert_eq!(b.fetch(1).await.unwrap().label, "b1");
    }
}
