//! Pure functions for mapping remote API errors to HTTP status codes.

use super::RemoteError;

/// Maps a [`RemoteError`] to the status code the timeline endpoint answers
/// with.
///
/// - `NotFound` -> 404 (Not Found)
/// - `RateLimited` -> 429 (Too Many Requests)
/// - everything else -> 502 (Bad Gateway)
///
/// # Examples
///
/// ```
/// use timelines_core::remote::{remote_error_to_status_code, RemoteError};
///
/// let error = RemoteError::NotFound {
///     resource: "User",
///     id: "1234".to_string(),
/// };
/// assert_eq!(remote_error_to_status_code(&error), 404);
/// ```
pub fn remote_error_to_status_code(error: &RemoteError) -> u16 {
    match error {
        RemoteError::NotFound { .. } => 404,
        RemoteError::RateLimited => 429,
        RemoteError::Request(_)
        | RemoteError::Unauthorized(_)
        | RemoteError::Status { .. }
        | RemoteError::InvalidResponse(_) => 502,
    }
}
