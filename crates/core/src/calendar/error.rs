use thiserror::Error;

/// Errors that can occur while turning reviews into a calendar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Malformed read date {value:?}: {reason}")]
    MalformedDate { value: String, reason: String },
    #[error("Review {review_id} has no read date")]
    MissingReadDate { review_id: u64 },
}

/// Result type for calendar operations.
pub type Result<T> = std::result::Result<T, CalendarError>;
