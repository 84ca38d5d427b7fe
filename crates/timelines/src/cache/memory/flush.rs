//! Snapshot flush tied to the shutdown signal.
//!
//! The flush runs as soon as shutdown is signalled instead of waiting for
//! the HTTP server to drain, so a supervisor that kills the process after a
//! short grace period still finds a fresh snapshot on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use timelines_core::cache::CacheMaintenance;

/// Spawns a task that writes the snapshot to `path` once `shutdown` fires
/// (or its sender is dropped). Resolves to the number of entries written,
/// or `None` when the write failed.
pub fn spawn_flush_on_shutdown<C>(
    cache: Arc<C>,
    path: PathBuf,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<Option<usize>>
where
    C: CacheMaintenance + ?Sized + 'static,
{
    tokio::spawn(async move {
        let _ = shutdown.recv().await;
        flush_snapshot(cache.as_ref(), &path).await
    })
}

/// Writes the snapshot and logs the outcome.
pub async fn flush_snapshot<C>(cache: &C, path: &Path) -> Option<usize>
where
    C: CacheMaintenance + ?Sized,
{
    match cache.save_snapshot(path).await {
        Ok(count) => {
            tracing::info!(path = %path.display(), count, "Saved cache snapshot");
            Some(count)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Failed to save cache snapshot");
            None
        }
    }
}
