//! On-disk snapshot format for the cache.
//!
//! A snapshot is a JSON document holding every entry with its raw bytes
//! (base64), creation time, and optional expiry:
//!
//! ```json
//! {
//!   "version": 1,
//!   "saved_at": "2021-01-17T05:14:03Z",
//!   "entries": {
//!     "Profile:1234": {
//!       "value": "eyJpZCI6IjEyMzQifQ==",
//!       "created_at": "2021-01-17T05:00:00Z",
//!       "expires_at": "2021-01-18T05:00:00Z"
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CacheError, Result, Ttl};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A full cache snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub entries: BTreeMap<String, SnapshotEntry>,
}

impl Snapshot {
    /// Creates an empty snapshot stamped with `saved_at`.
    pub fn new(saved_at: DateTime<Utc>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at,
            entries: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: SnapshotEntry) {
        self.entries.insert(key.into(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One cached value inside a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Base64 of the cached bytes.
    pub value: String,
    pub created_at: DateTime<Utc>,
    /// `None` for entries that never expire.
    pub expires_at: Option<DateTime<Utc>>,
}

impl SnapshotEntry {
    pub fn new(value: &[u8], created_at: DateTime<Utc>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            value: STANDARD.encode(value),
            created_at,
            expires_at,
        }
    }

    /// Decodes the stored bytes.
    pub fn bytes(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(&self.value)
            .map_err(|e| CacheError::Serialization(format!("invalid base64 value: {e}")))
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        is_expired(self.expires_at, now)
    }
}

/// Returns true if an entry expiring at `expires_at` is dead at `now`.
///
/// An entry is considered expired from its expiry instant onwards.
pub fn is_expired(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    expires_at.is_some_and(|at| at <= now)
}

/// Computes the expiry instant for an entry written at `now`.
///
/// `Ttl::Default` resolves to `default_ttl`. Durations too large to
/// represent are treated as never expiring.
pub fn expires_at(now: DateTime<Utc>, ttl: Ttl, default_ttl: Duration) -> Option<DateTime<Utc>> {
    let duration = match ttl {
        Ttl::Never => return None,
        Ttl::Default => default_ttl,
        Ttl::After(duration) => duration,
    };

    chrono::Duration::from_std(duration)
        .ok()
        .and_then(|d| now.checked_add_signed(d))
}

/// Encodes a snapshot to JSON bytes.
pub fn encode_snapshot(snapshot: &Snapshot) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(snapshot).map_err(|e| CacheError::Serialization(e.to_string()))
}

/// Decodes a snapshot from JSON bytes, rejecting unknown format versions.
pub fn decode_snapshot(bytes: &[u8]) -> Result<Snapshot> {
    let snapshot: Snapshot =
        serde_json::from_slice(bytes).map_err(|e| CacheError::Serialization(e.to_string()))?;

    if snapshot.version != SNAPSHOT_VERSION {
        return Err(CacheError::Persistence(format!(
            "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
            snapshot.version
        )));
    }

    Ok(snapshot)
}
