use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use timelines_core::calendar::CalendarError;
use timelines_core::remote::{remote_error_to_status_code, RemoteError};

/// Request-level failures raised by the handlers themselves.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Invalid user id: {0:?}")]
    InvalidUserId(String),
    #[error("Timed out after {}s fetching reading history", .0.as_secs())]
    FetchTimeout(Duration),
}

/// Application error type that wraps `anyhow::Error`.
///
/// The status code is picked by downcasting to the typed errors the
/// handlers can produce; anything else is a 500.
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        if let Some(remote_error) = self.0.downcast_ref::<RemoteError>() {
            let code = remote_error_to_status_code(remote_error);
            return StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY);
        }

        if self.0.downcast_ref::<CalendarError>().is_some() {
            return StatusCode::UNPROCESSABLE_ENTITY;
        }

        match self.0.downcast_ref::<RequestError>() {
            Some(RequestError::InvalidUserId(_)) => StatusCode::BAD_REQUEST,
            Some(RequestError::FetchTimeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!(error = %self.0, status = %status_code, "Request failed");
        } else {
            tracing::debug!(error = %self.0, status = %status_code, "Request rejected");
        }

        (status_code, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
