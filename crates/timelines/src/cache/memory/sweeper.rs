//! Background task that periodically drops expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use timelines_core::cache::CacheMaintenance;

/// Spawns a task that calls `sweep_expired` every `every` until `shutdown`
/// fires (or its sender is dropped).
pub fn spawn_sweeper<C>(
    cache: Arc<C>,
    every: Duration,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()>
where
    C: CacheMaintenance + ?Sized + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match cache.sweep_expired().await {
                        Ok(0) => {}
                        Ok(removed) => tracing::debug!(removed, "Swept expired cache entries"),
                        Err(err) => tracing::warn!(error = %err, "Cache sweep failed"),
                    }
                }
                _ = shutdown.recv() => {
                    tracing::debug!("Cache sweeper stopping");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use chrono::Utc;
    use timelines_core::cache::{Cache, MockClock, Ttl};

    #[tokio::test]
    async fn test_sweeper_removes_expired_entries_and_stops() {
        let clock = MockClock::starting_at(Utc::now());
        let cache = Arc::new(MemoryCache::with_clock(
            Duration::from_secs(60),
            Arc::new(clock.clone()),
        ));
        cache.set("stale", b"1", Ttl::Default).await.unwrap();
        cache.set("pinned", b"2", Ttl::Never).await.unwrap();
        clock.advance(Duration::from_secs(61));

        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let handle = spawn_sweeper(cache.clone(), Duration::from_millis(10), shutdown_rx);

        let mut remaining = cache.len().await;
        for _ in 0..100 {
            if remaining == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
            remaining = cache.len().await;
        }
        assert_eq!(remaining, 1);

        shutdown_tx.send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper should stop on shutdown")
            .unwrap();
    }
}
