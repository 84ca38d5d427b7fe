//! In-memory cache implementation with TTL expiry and file snapshots.
//!
//! Entries expire lazily: an expired entry is reported as missing by `get`
//! and `keys` but stays in the map until the next sweep removes it.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use timelines_core::cache::{
    decode_snapshot, encode_snapshot, expires_at, is_expired, Cache, CacheError,
    CacheMaintenance, Clock, Result, Snapshot, SnapshotEntry, SystemClock, Ttl,
};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    /// Returns true if this entry has expired at `now`.
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        is_expired(self.expires_at, now)
    }
}

/// In-memory cache implementation.
///
/// Thread-safe cache using `Arc<RwLock<HashMap>>` for concurrent access.
/// Clones share the same store. Time is read through a [`Clock`] so TTL
/// behaviour can be driven from tests.
#[derive(Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<HashMap<String, CacheEntry>>>,
    default_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

impl MemoryCache {
    /// Creates a new in-memory cache using the system clock.
    ///
    /// # Arguments
    ///
    /// * `default_ttl` - Lifetime of entries written with `Ttl::Default`.
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_clock(default_ttl, Arc::new(SystemClock))
    }

    /// Creates a new in-memory cache reading time from `clock`.
    pub fn with_clock(default_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Arc::new(RwLock::new(HashMap::new())),
            default_ttl,
            clock,
        }
    }

    /// Number of entries held, including expired ones not yet swept.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Returns true if the store holds no entries.
    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

/// Sibling path the snapshot is written to before being renamed into place.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("snapshot"));
    name.push(".tmp");
    path.with_file_name(name)
}

fn persistence_error(path: &Path, err: impl std::fmt::Display) -> CacheError {
    CacheError::Persistence(format!("{}: {err}", path.display()))
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let now = self.clock.now();
        let store = self.store.read().await;

        match store.get(key) {
            Some(entry) if entry.is_expired(now) => Ok(None),
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Ttl) -> Result<()> {
        let now = self.clock.now();
        let entry = CacheEntry {
            value: value.to_vec(),
            created_at: now,
            expires_at: expires_at(now, ttl, self.default_ttl),
        };

        self.store.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.store.write().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let now = self.clock.now();
        let store = self.store.read().await;

        let mut keys: Vec<String> = store
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }
}

#[async_trait]
impl CacheMaintenance for MemoryCache {
    async fn sweep_expired(&self) -> Result<usize> {
        let now = self.clock.now();
        let mut store = self.store.write().await;

        let before = store.len();
        store.retain(|_, entry| !entry.is_expired(now));
        Ok(before - store.len())
    }

    async fn save_snapshot(&self, path: &Path) -> Result<usize> {
        let mut snapshot = Snapshot::new(self.clock.now());
        {
            let store = self.store.read().await;
            for (key, entry) in store.iter() {
                snapshot.insert(
                    key.clone(),
                    SnapshotEntry::new(&entry.value, entry.created_at, entry.expires_at),
                );
            }
        }

        let bytes = encode_snapshot(&snapshot)?;
        let temp = temp_path(path);

        tokio::fs::write(&temp, &bytes)
            .await
            .map_err(|e| persistence_error(&temp, e))?;
        tokio::fs::rename(&temp, path)
            .await
            .map_err(|e| persistence_error(path, e))?;

        tracing::debug!(path = %path.display(), count = snapshot.len(), "Wrote cache snapshot");
        Ok(snapshot.len())
    }

    async fn load_snapshot(&self, path: &Path) -> Result<usize> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| persistence_error(path, e))?;
        let snapshot = decode_snapshot(&bytes).map_err(|e| persistence_error(path, e))?;

        let now = self.clock.now();
        let mut restored = 0;
        let mut store = self.store.write().await;

        for (key, entry) in snapshot.entries {
            if entry.is_expired(now) || store.contains_key(&key) {
                continue;
            }

            let value = match entry.bytes() {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "Skipping undecodable snapshot entry");
                    continue;
                }
            };

            store.insert(
                key,
                CacheEntry {
                    value,
                    created_at: entry.created_at,
                    expires_at: entry.expires_at,
                },
            );
            restored += 1;
        }

        Ok(restored)
    }
}
