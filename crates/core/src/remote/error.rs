use thiserror::Error;

/// Errors returned by the remote reading API.
///
/// These are surfaced to the caller as-is; nothing in the workspace retries
/// a failed request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Request failed: {0}")]
    Request(String),
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Rate limited by remote API")]
    RateLimited,
    #[error("Remote API returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for remote API operations.
pub type Result<T> = std::result::Result<T, RemoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_display() {
        let error = RemoteError::Request("connection refused".to_string());
        assert_eq!(error.to_string(), "Request failed: connection refused");
    }

    #[test]
    fn test_not_found_display() {
        let error = RemoteError::NotFound {
            resource: "User",
            id: "1234".to_string(),
        };
        assert_eq!(error.to_string(), "User not found: 1234");
    }

    #[test]
    fn test_unauthorized_display() {
        let error = RemoteError::Unauthorized("invalid key".to_string());
        assert_eq!(error.to_string(), "Unauthorized: invalid key");
    }

    #[test]
    fn test_rate_limited_display() {
        assert_eq!(
            RemoteError::RateLimited.to_string(),
            "Rate limited by remote API"
        );
    }

    #[test]
    fn test_status_display() {
        let error = RemoteError::Status {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Remote API returned 503: Service Unavailable"
        );
    }

    #[test]
    fn test_invalid_response_display() {
        let error = RemoteError::InvalidResponse("missing field `reviews`".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid response: missing field `reviews`"
        );
    }
}
