//! Shared application state.
//!
//! Holds the configuration, the cache and the event fetcher that every
//! request handler works through.

use std::sync::Arc;

use tokio::sync::broadcast;

use timelines_core::cache::{FullCache, Ttl};
use timelines_core::calendar::TimelineOptions;
use timelines_core::remote::ReadingApi;

use crate::cache::MemoryCache;
use crate::config::Config;
use crate::fetcher::EventFetcher;
use crate::remote::{CachedReadingApi, InMemoryReadingApi};

/// Shared application state.
///
/// This is cloned for each request handler. The cache is the only shared
/// mutable resource.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Cache in front of the reading API.
    pub cache: Arc<dyn FullCache>,
    /// Fetcher reading through `cache`.
    pub fetcher: EventFetcher,
    /// Shutdown signal sender for background tasks.
    pub shutdown_tx: broadcast::Sender<()>,
}

impl AppState {
    /// Creates the state, putting `cache` in front of `api`.
    pub fn new(config: Config, api: Arc<dyn ReadingApi>, cache: Arc<dyn FullCache>) -> Self {
        let cached_api = CachedReadingApi::new(api, cache.clone(), Ttl::Default);
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config: Arc::new(config),
            cache,
            fetcher: EventFetcher::new(Arc::new(cached_api)),
            shutdown_tx,
        }
    }

    /// Options applied to every timeline built by this server.
    pub fn timeline_options(&self) -> TimelineOptions {
        TimelineOptions {
            require_read_count: self.config.require_read_count,
        }
    }

    /// Subscribe to shutdown signal.
    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signal all background tasks to shut down.
    pub fn signal_shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

impl Default for AppState {
    /// Demo data behind a fresh in-memory cache.
    fn default() -> Self {
        let config = Config::default();
        let cache = Arc::new(MemoryCache::new(config.cache_ttl()));
        Self::new(config, Arc::new(InMemoryReadingApi::with_demo_data()), cache)
    }
}
