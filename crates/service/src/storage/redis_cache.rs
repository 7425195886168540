use async_trait::async_trait;
use redis::{
    aio::{ConnectionManager, ConnectionManagerConfig},
    AsyncCommands, Client,
};
use tracing::info;

use crate::errors::ServiceError;
use crate::storage::DocumentCache;

/// Redis-backed document cache.
///
/// Holds one long-lived `ConnectionManager` shared across all requests;
/// reconnection and multiplexing are whatever the client provides. Documents
/// are plain string values holding JSON, listed via a key-pattern scan.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    pub async fn connect(cache_url: &str) -> Result<Self, ServiceError> {
        let client = Client::open(cache_url).map_err(cache_err)?;
        let config = ConnectionManagerConfig::new().set_number_of_retries(1);
        let conn = client
            .get_connection_manager_with_config(config)
            .await
            .map_err(cache_err)?;
        info!(%cache_url, "connected to cache");
        Ok(Self { conn })
    }
}

fn cache_err(e: redis::RedisError) -> ServiceError {
    ServiceError::Cache(e.to_string())
}

#[async_trait]
impl DocumentCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, ServiceError> {
        let mut conn = self.conn.clone();
        let body: Option<String> = conn.get(key).await.map_err(cache_err)?;
        Ok(body)
    }

    async fn put(&self, key: &str, body: String) -> Result<(), ServiceError> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(key, body).await.map_err(cache_err)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, ServiceError> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn.del(key).await.map_err(cache_err)?;
        Ok(removed > 0)
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, ServiceError> {
        let mut conn = self.conn.clone();
        let keys: Vec<String> = conn.keys(format!("{prefix}*")).await.map_err(cache_err)?;
        Ok(keys)
    }
}
