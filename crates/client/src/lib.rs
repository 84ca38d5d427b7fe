//! timelines_client - HTTP client for the Goodreads reading API.

pub mod client;
pub mod error;

pub use client::GoodreadsClient;
pub use error::{ClientError, Result};
