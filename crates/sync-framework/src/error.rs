//! # Transport Errors
//!
//! This module defines the only failure kind the framework generates internally.
//! Every store-level error message is the `Display` text of a [`TransportError`].

/// Errors produced while talking to the remote collection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    /// The request never produced an HTTP response (connection refused, timeout, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a status outside `200..=299`.
    ///
    /// `message` is already formatted as `HTTP {status} {reason}[: {body}]`.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected schema.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// The request payload could not be encoded as JSON.
    #[error("Invalid request body: {0}")]
    Encode(String),
}

impl TransportError {
    /// Builds a status error with the canonical message format.
    pub fn status(status: u16, reason: &str, body: Option<&str>) -> Self {
        let message = match body {
            Some(body) if !body.is_empty() => format!("HTTP {} {}: {}", status, reason, body),
            _ => format!("HTTP {} {}", status, reason),
        };
        TransportError::Status { status, message }
    }

    /// The HTTP status code, if the failure came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }
}
