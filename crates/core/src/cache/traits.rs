use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// How long a cache entry lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Use the store's configured default TTL.
    Default,
    /// Never expire.
    Never,
    /// Expire after the given duration.
    After(Duration),
}

/// Trait for basic cache operations.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key. Expired entries are reported as
    /// missing.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache, overwriting any previous value.
    async fn set(&self, key: &str, value: &[u8], ttl: Ttl) -> Result<()>;

    /// Deletes a value from the cache by key.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Lists the keys of all live (non-expired) entries.
    async fn keys(&self) -> Result<Vec<String>>;
}

/// Trait for cache housekeeping: expiry sweeps and snapshot persistence.
#[async_trait]
pub trait CacheMaintenance: Send + Sync {
    /// Removes every expired entry, returning how many were removed.
    async fn sweep_expired(&self) -> Result<usize>;

    /// Writes every entry currently held to `path`, returning the count.
    async fn save_snapshot(&self, path: &Path) -> Result<usize>;

    /// Merges a snapshot from `path` into the store, returning how many
    /// live entries were restored.
    async fn load_snapshot(&self, path: &Path) -> Result<usize>;
}

/// Combined trait for caches that support both lookups and housekeeping.
pub trait FullCache: Cache + CacheMaintenance {}

impl<T: Cache + CacheMaintenance> FullCache for T {}
