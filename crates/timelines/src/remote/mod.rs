//! Reading API adapters used by the server.
//!
//! - [`CachedReadingApi`] puts the cache in front of any [`ReadingApi`].
//! - [`InMemoryReadingApi`] serves seeded data for demos and tests.
//!
//! [`ReadingApi`]: timelines_core::remote::ReadingApi

mod cached;
mod inmemory;

pub use cached::CachedReadingApi;
pub use inmemory::InMemoryReadingApi;
