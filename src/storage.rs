use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::config::Config;
use crate::error::{AppError, Result};

/// A string key/value backend holding JSON-encoded entries.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the raw value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<()>;
    /// Deletes `key`. Missing keys are not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// A process-local backend. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// A Redis backend. Every key is namespaced with `prefix`.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisStore {
    /// Connects to `url` through a pooled connection manager.
    pub async fn connect(url: &str, prefix: impl Into<String>) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self {
            conn,
            prefix: prefix.into(),
        })
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(self.key(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(self.key(key), value).await.map_err(|e| {
            tracing::error!("❌ Redis SET failed for {}: {}", key, e);
            AppError::Redis(e)
        })?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(self.key(key)).await?;
        Ok(())
    }
}

/// The record store handle shared by every request.
///
/// Reads go straight to the backend. Read-modify-write sequences must hold
/// the guard from [`Store::lock_writes`] so concurrent appends are not lost.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl Store {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// A store backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Serialises writers for the lifetime of the returned guard.
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Direct access to the backend, for raw reads and writes.
    pub fn backend(&self) -> &dyn KeyValueStore {
        self.backend.as_ref()
    }

    /// Reads and parses the JSON entry under `key`.
    ///
    /// Returns `Ok(None)` for a missing entry and `StoreReadFailure` for one
    /// that does not parse.
    pub async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.backend.get(key).await? else {
            return Ok(None);
        };

        sonic_rs::from_str::<T>(&raw).map(Some).map_err(|e| {
            tracing::warn!("❌ Entry {} is not valid JSON: {}", key, e);
            AppError::StoreReadFailure(key.to_string())
        })
    }

    /// Serialises `value` as JSON and stores it under `key`.
    pub async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = sonic_rs::to_string(value)
            .map_err(|e| AppError::Internal(format!("Serialization of {} failed: {}", key, e)))?;
        self.backend.set(key, raw).await
    }
}

/// Opens the store described by `config`: Redis when a URL is set,
/// memory otherwise.
pub async fn open(config: &Config) -> Result<Store> {
    match config.redis_url.as_deref() {
        Some(url) => {
            let redis = RedisStore::connect(url, config.key_prefix.clone()).await?;
            tracing::info!("✅ Redis store connected (prefix {})", config.key_prefix);
            Ok(Store::new(redis))
        }
        None => {
            tracing::info!("✅ In-memory store initialized (REDIS_URL not set)");
            Ok(Store::in_memory())
        }
    }
}
