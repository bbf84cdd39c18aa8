use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::TransportError;

/// A fully prepared webhook delivery: where to send, with which credential,
/// and what.
///
/// Building an `OutboundRequest` involves no I/O. Handing it to a
/// [`Transport`] is the only step that touches the network.
///
/// The `Authorization: Bot <token>` header is only attached when a token is
/// configured. Requests built with an empty token carry no `Authorization`
/// header at all; see [`OutboundRequest::authorization`].
#[derive(Clone, Serialize)]
pub struct OutboundRequest {
    /// Resolved, sanitized webhook URL.
    pub url: String,
    /// Bot credential; sent as `Authorization: Bot <token>` when non-empty.
    #[serde(skip)]
    pub token: String,
    /// JSON body.
    pub body: serde_json::Value,
}

impl std::fmt::Debug for OutboundRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutboundRequest")
            .field("url", &"[REDACTED]")
            .field("token", &"[REDACTED]")
            .field("body", &self.body)
            .finish()
    }
}

impl OutboundRequest {
    #[must_use]
    pub fn new(url: impl Into<String>, token: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            body,
        }
    }

    /// Value of the `Authorization` header, if a token is present.
    ///
    /// Returns `None` for an empty token, in which case transports send the
    /// request without an `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        (!self.token.is_empty()).then(|| format!("Bot {}", self.token))
    }
}

/// Success envelope returned by a transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportResponse {
    /// HTTP status code of the response.
    pub status: u16,
    /// Response body (`{"ok": true}` when the endpoint returned none).
    pub body: serde_json::Value,
    /// Selected response headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl TransportResponse {
    #[must_use]
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body,
            headers: HashMap::new(),
        }
    }
}

/// Result of a single delivery attempt.
pub type DeliveryResult = Result<TransportResponse, TransportError>;

/// Strongly-typed delivery trait with native `async fn`.
///
/// This trait is **not** object-safe. If you need dynamic dispatch, use
/// [`DynTransport`] instead -- every `Transport` automatically implements
/// `DynTransport` via a blanket implementation.
pub trait Transport: Send + Sync {
    /// Short name used in logs (`"http"`, `"log"`, ...).
    fn name(&self) -> &str;

    /// Deliver the request once. Implementations must not retry.
    fn deliver(
        &self,
        request: &OutboundRequest,
    ) -> impl std::future::Future<Output = DeliveryResult> + Send;
}

/// Object-safe transport trait for use behind `Arc<dyn DynTransport>`.
///
/// You generally should not implement this trait directly -- instead
/// implement [`Transport`] and rely on the blanket implementation.
#[async_trait]
pub trait DynTransport: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Deliver the request once.
    async fn deliver(&self, request: &OutboundRequest) -> DeliveryResult;
}

#[async_trait]
impl<T: Transport + Sync> DynTransport for T {
    fn name(&self) -> &str {
        Transport::name(self)
    }

    async fn deliver(&self, request: &OutboundRequest) -> DeliveryResult {
        Transport::deliver(self, request).await
    }
}
