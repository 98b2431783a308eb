//! Error types for the flexgrab client.
//!
//! This module provides the closed error taxonomy returned to every
//! caller: endpoint resolution defects, transport failures, decode
//! failures, and business-logic rejections from the server.

use thiserror::Error;

/// The unified error type for flexgrab operations.
///
/// Every asynchronous completion path in the client terminates in either
/// a success value or one of these variants; raw transport or decode
/// exceptions are never surfaced directly.
#[derive(Debug, Error)]
pub enum Error {
    /// The request path could not be resolved against the base address.
    ///
    /// This is a configuration defect. It is reported before any network
    /// I/O happens and is never worth retrying.
    #[error("invalid endpoint: {path}")]
    InvalidEndpoint { path: String },

    /// Network transport errors (DNS, TLS, connection, timeout,
    /// cancellation). Callers may retry at their discretion.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A response arrived but could not be parsed into the expected
    /// shape. This signals an API contract mismatch, not a network
    /// problem; retrying will not help.
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// A well-formed server response refusing the request for business
    /// reasons. The message is surfaced verbatim to the user.
    #[error("{message}")]
    Rejected { message: String },
}

impl Error {
    /// Create a rejection error from a server message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Error::Rejected {
            message: message.into(),
        }
    }

    /// Returns true for failures of the network itself, as opposed to
    /// contract mismatches or server refusals.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// The request body could not be serialized; the request was never
    /// sent. Treated as a local I/O failure, not a server error.
    #[error("failed to encode request body: {message}")]
    Body { message: String },

    /// Generic HTTP error, including cancellation of an in-flight call.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_displays_message_verbatim() {
        let err = Error::rejected("bad credentials");
        assert_eq!(err.to_string(), "bad credentials");
    }

    #[test]
    fn transport_and_decode_are_distinct() {
        let transport = Error::Transport(TransportError::Connection {
            message: "refused".to_string(),
        });
        let decode = Error::Decode {
            message: "missing field".to_string(),
        };
        assert!(transport.is_transport());
        assert!(!decode.is_transport());
    }
}
