use std::time::Duration;

use postcord_provider::TransportError;
use thiserror::Error;

/// Errors specific to webhook delivery.
///
/// These are internal errors that get converted into [`TransportError`] at
/// the public API boundary.
#[derive(Debug, Error)]
pub enum DiscordError {
    /// An HTTP-level transport error occurred.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request did not complete within the client timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The webhook endpoint returned an error response.
    #[error("webhook API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The payload could not be serialized.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// No webhook URL resolved for the dispatch.
    #[error("no webhook URL configured for context '{0}'")]
    MissingWebhookUrl(String),

    /// The endpoint answered with HTTP 429 (Too Many Requests).
    #[error("rate limited by webhook endpoint")]
    RateLimited,
}

impl From<DiscordError> for TransportError {
    fn from(err: DiscordError) -> Self {
        match err {
            DiscordError::Http(e) => TransportError::Connection(e.to_string()),
            DiscordError::Timeout(d) => TransportError::Timeout(d),
            DiscordError::Api { status, body } => TransportError::Rejected { status, body },
            DiscordError::InvalidPayload(msg) => TransportError::Serialization(msg),
            DiscordError::MissingWebhookUrl(context) => TransportError::Configuration(format!(
                "no webhook URL configured for context '{context}'"
            )),
            DiscordError::RateLimited => TransportError::RateLimited,
        }
    }
}
