//! Error types for the relay domain.
//!
//! [`RelayError`] covers everything that can go wrong while handling one
//! inbound delivery. [`NotifyError`] is the error half of the
//! [`crate::Notifier`] port; adapter crates convert their own transport
//! errors into it so the domain never sees `reqwest` or Bot API types.
//!
//! Nothing here is retried. A failed delivery is logged and surfaced to the
//! webhook caller, which owns any retry.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Notifier errors
// ---------------------------------------------------------------------------

/// Failure reported by a [`crate::Notifier`] implementation.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The chat service could not be reached, or the connection failed
    /// mid-request (DNS, TLS, timeout, reset).
    #[error("Chat service unreachable: {message}")]
    Transport {
        /// Transport-level detail from the adapter.
        message: String,
    },

    /// The chat service answered but refused the message.
    #[error("Chat service rejected the message (status {status}): {description}")]
    Rejected {
        /// HTTP status of the provider's response.
        status: u16,
        /// Provider-specific explanation (e.g. the Bot API `description` field).
        description: String,
    },
}

// ---------------------------------------------------------------------------
// Relay errors
// ---------------------------------------------------------------------------

/// Errors produced while parsing, rendering, or forwarding a deployment event.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The inbound body is not a JSON object of the expected shape.
    ///
    /// The receiver acknowledges these with 200; they are never forwarded.
    #[error("Malformed webhook payload: {message}")]
    MalformedPayload {
        /// Parser detail (serde_json error text).
        message: String,
    },

    /// The outbound notification could not be delivered.
    #[error("Notification delivery failed: {0}")]
    Delivery(#[from] NotifyError),

    /// A configuration value is invalid. Produced at startup only.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedPayload {
            message: err.to_string(),
        }
    }
}
