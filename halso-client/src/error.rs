//! Client error types
//!
//! Network failures, non-2xx responses and client-side validation all end
//! up here. None of them is fatal; callers turn them into a toast through
//! [`ClientError::user_message`] and leave their state untouched.

use shared::validation::{Violation, summarize};
use thiserror::Error;

use crate::session::SessionError;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response not covered by a more specific variant
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// 401 from the backend
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 404 from the backend
    #[error("Not found: {0}")]
    NotFound(String),

    /// 2xx response whose body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request body could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Draft or form failed client-side checks; nothing was sent
    #[error("Validation error: {}", summarize(.0))]
    Validation(Vec<Violation>),

    /// Persisted session could not be written
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Build the error for a non-2xx status with an already-extracted message
    pub fn from_status(status: http::StatusCode, message: String) -> Self {
        match status {
            http::StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            http::StatusCode::NOT_FOUND => Self::NotFound(message),
            _ => Self::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Short text for a toast notification
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(e) if e.is_timeout() => "The server did not respond in time".to_string(),
            Self::Http(_) => "Could not reach the server".to_string(),
            Self::Api { message, .. }
            | Self::Unauthorized(message)
            | Self::NotFound(message) => message.clone(),
            Self::InvalidResponse(_) => "Unexpected response from the server".to_string(),
            Self::Validation(violations) => summarize(violations),
            other => other.to_string(),
        }
    }

    /// HTTP status, when the error came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized(_) => Some(401),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
