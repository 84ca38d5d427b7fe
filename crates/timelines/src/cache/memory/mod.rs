//! In-memory cache backend implementation.
//!
//! Provides a thread-safe in-memory cache with TTL support, a periodic
//! expiry sweep and snapshot persistence for single-instance deployments.

mod cache;
mod flush;
mod sweeper;

pub use cache::MemoryCache;
pub use flush::{flush_snapshot, spawn_flush_on_shutdown};
pub use sweeper::spawn_sweeper;
