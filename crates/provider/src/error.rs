use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while delivering a webhook request.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A network or transport-level error occurred.
    #[error("connection error: {0}")]
    Connection(String),

    /// The remote endpoint answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The remote endpoint rejected the request due to rate limiting.
    #[error("rate limited")]
    RateLimited,

    /// The request could not be built from the current configuration
    /// (for example, no webhook URL resolved).
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The payload could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The endpoint did not respond within the allowed duration.
    #[error("timeout after {0:?}")]
    Timeout(Duration),
}

impl TransportError {
    /// Returns `true` if the failure is transient and a later attempt may
    /// succeed. Informational only; delivery is never retried automatically.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Connection(_) | Self::RateLimited => true,
            Self::Rejected { status, .. } => *status >= 500,
            Self::Configuration(_) | Self::Serialization(_) => false,
        }
    }

    /// HTTP status carried by the error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::RateLimited => Some(429),
            _ => None,
        }
    }
}
