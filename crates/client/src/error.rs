//! Error types for the Folio client.

use thiserror::Error;

/// Message shown when the endpoint gives no usable reason.
pub const GENERIC_FAILURE: &str = "Failed to send message";

/// Errors that can occur when submitting through the client.
///
/// None of them is retried automatically: the user re-triggers the submit.
#[derive(Debug, Error)]
pub enum Error {
    /// No response was received (network failure, DNS resolution, timeout).
    #[error("connection error: {0}")]
    Connection(String),

    /// The endpoint answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// The `detail` field of the response body, or [`GENERIC_FAILURE`].
        message: String,
    },

    /// A success response whose body could not be read as JSON.
    #[error("failed to deserialize response: {0}")]
    Deserialization(String),

    /// The submission could not be encoded as a request body.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// Client configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Text to show the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Connection(description) => description.clone(),
            Self::Http { message, .. } => message.clone(),
            Self::Deserialization(_) | Self::InvalidPayload(_) | Self::Configuration(_) => {
                GENERIC_FAILURE.to_string()
            }
        }
    }

    /// Returns `true` if this is a connection error.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns the HTTP status if the endpoint answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
