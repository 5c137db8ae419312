//! Error types for the petstore service clients.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to a petstore collaborator.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request never produced a response (connect failure, timeout, reset).
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// A success response whose body did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(#[source] reqwest::Error),

    /// A non-HTTP collaborator could not serve the request.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

impl ServiceError {
    /// The HTTP status, when the service produced one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ServiceError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
