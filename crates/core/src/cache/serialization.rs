//! Pure functions for serializing/deserializing domain types to/from cache bytes.
//!
//! Cached values are always stored as JSON bytes and read back through the
//! functions below, so a value looks the same whether it was written by
//! this process or restored from a snapshot.

use crate::calendar::{Profile, Review};
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a profile to JSON bytes.
pub fn serialize_profile(profile: &Profile) -> Result<Vec<u8>> {
    serde_json::to_vec(profile).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a profile.
pub fn deserialize_profile(bytes: &[u8]) -> Result<Profile> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes a page of reviews to JSON bytes.
///
/// # Arguments
/// * `reviews` - The reviews to serialize, in API order
///
/// # Returns
/// JSON-encoded bytes representing the reviews array
pub fn serialize_reviews(reviews: &[Review]) -> Result<Vec<u8>> {
    serde_json::to_vec(reviews).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a page of reviews.
pub fn deserialize_reviews(bytes: &[u8]) -> Result<Vec<Review>> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
