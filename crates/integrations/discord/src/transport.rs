use std::collections::HashMap;
use std::time::Duration;

use postcord_core::HttpConfig;
use postcord_provider::{DeliveryResult, OutboundRequest, Transport, TransportResponse};
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use tracing::{debug, instrument, warn};

use crate::error::DiscordError;
use crate::types::WebhookResponse;

/// Response headers copied into [`TransportResponse::headers`].
const KEPT_HEADER_PREFIX: &str = "x-ratelimit-";

/// Transport that POSTs the request body as JSON to the webhook URL.
///
/// Sends `Authorization: Bot <token>` when the request carries a token. A
/// single attempt is made per delivery; failures are returned, not retried.
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport with its own client and the given request timeout.
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");
        Self { client, timeout }
    }

    pub fn from_settings(http: &HttpConfig) -> Self {
        Self::new(Duration::from_secs(http.timeout_seconds))
    }

    /// Create a transport with a custom HTTP client. `timeout` is only used
    /// to describe timeouts reported by that client.
    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    fn classify(&self, err: reqwest::Error) -> DiscordError {
        if err.is_timeout() {
            DiscordError::Timeout(self.timeout)
        } else {
            DiscordError::Http(err)
        }
    }

    /// Interpret the webhook HTTP response, handling status codes and
    /// building the success envelope.
    async fn interpret_response(&self, response: reqwest::Response) -> DeliveryResult {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("webhook rate limit hit");
            return Err(DiscordError::RateLimited.into());
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DiscordError::Api {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter(|(name, _)| name.as_str().starts_with(KEPT_HEADER_PREFIX))
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_owned(), v.to_owned()))
            })
            .collect();

        let body = if status == reqwest::StatusCode::NO_CONTENT {
            serde_json::json!({ "ok": true })
        } else {
            match response.json::<WebhookResponse>().await {
                Ok(resp) => serde_json::json!({
                    "ok": true,
                    "id": resp.id,
                    "channel_id": resp.channel_id,
                }),
                Err(_) => serde_json::json!({ "ok": true }),
            }
        };

        let mut envelope = TransportResponse::new(status.as_u16(), body);
        envelope.headers = headers;
        Ok(envelope)
    }
}

impl Transport for HttpTransport {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, request), fields(transport = "http"))]
    async fn deliver(&self, request: &OutboundRequest) -> DeliveryResult {
        if request.url.is_empty() {
            return Err(DiscordError::MissingWebhookUrl(String::new()).into());
        }

        debug!("posting message to webhook");

        let mut builder = self.client.post(&request.url).json(&request.body);
        if let Some(authorization) = request.authorization() {
            builder = builder.header(AUTHORIZATION, authorization);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        self.interpret_response(response).await
    }
}
