//! Cache backend implementations.
//!
//! This module provides the concrete implementation of the cache traits
//! defined in `timelines_core::cache`: an in-process store with TTL expiry,
//! a background sweeper and file snapshots.

pub mod memory;

pub use memory::{flush_snapshot, spawn_flush_on_shutdown, spawn_sweeper, MemoryCache};
