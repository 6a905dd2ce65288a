//! Error type shared by every shortener operation.
//!
//! # Design
//! Callers only ever see one of three failures. The `Display` output is the
//! user-facing message; the `String` carried by `Connection` and
//! `RequestSetup` is the underlying cause and is meant for logs.

use thiserror::Error;

/// Message shown when no response was received.
pub const CONNECTION_MESSAGE: &str = "Cannot connect to server. Please check if the API is running.";

/// Message shown when the request could not be issued at all.
pub const REQUEST_SETUP_MESSAGE: &str = "Request failed. Please try again.";

/// Fallback for non-2xx responses whose body names no error.
pub const SERVER_ERROR_MESSAGE: &str = "Server error occurred";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request was sent but no response came back (refused, timed out).
    #[error("Cannot connect to server. Please check if the API is running.")]
    Connection(String),

    /// The request was never sent, e.g. the base URL is malformed.
    #[error("Request failed. Please try again.")]
    RequestSetup(String),

    /// A response arrived and represents a failure: a non-2xx status, a body
    /// whose `success` flag is not `true`, or a payload of the wrong shape.
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ClientError::Api {
            status,
            message: message.into(),
        }
    }

    /// Underlying cause for logging. For `Api` this is the message itself.
    pub fn detail(&self) -> &str {
        match self {
            ClientError::Connection(detail) | ClientError::RequestSetup(detail) => detail,
            ClientError::Api { message, .. } => message,
        }
    }
}
