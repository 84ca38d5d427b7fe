//! Functional core for the timelines project.
//!
//! Everything in this crate is pure: domain types, the day bucketer, the
//! calendar grid builder, cache key/serialization/snapshot formats and the
//! remote API contract. I/O lives in the `timelines` and `timelines_client`
//! crates.

pub mod cache;
pub mod calendar;
pub mod remote;
pub mod serde;
