//! Client error types.

use thiserror::Error;
use timelines_core::remote::RemoteError;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<ClientError> for RemoteError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Request(e) => RemoteError::Request(e.without_url().to_string()),
            ClientError::NotFound { resource, id } => RemoteError::NotFound { resource, id },
            ClientError::Unauthorized(message) => RemoteError::Unauthorized(message),
            ClientError::RateLimited => RemoteError::RateLimited,
            ClientError::ServerError { status, message } => {
                RemoteError::Status { status, message }
            }
            ClientError::InvalidResponse(message) => RemoteError::InvalidResponse(message),
        }
    }
}
