use tracing::info;

use crate::transport::{DeliveryResult, OutboundRequest, Transport, TransportResponse};

/// A transport that logs the request and reports success without performing
/// any network I/O.
///
/// Useful for dry runs and for hosts that want to preview messages.
#[derive(Debug, Default)]
pub struct LogTransport;

impl LogTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for LogTransport {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "log"
    }

    async fn deliver(&self, request: &OutboundRequest) -> DeliveryResult {
        info!(
            transport = "log",
            authorized = request.authorization().is_some(),
            body = %request.body,
            "log transport accepted request"
        );
        Ok(TransportResponse::new(
            204,
            serde_json::json!({ "ok": true, "logged": true }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_transport_name() {
        assert_eq!(Transport::name(&LogTransport::new()), "log");
    }

    #[tokio::test]
    async fn log_transport_returns_success() {
        let request = OutboundRequest::new("https://a.test", "", serde_json::json!({"content": "x"}));
        let resp = Transport::deliver(&LogTransport::new(), &request).await.unwrap();
        assert_eq!(resp.status, 204);
        assert_eq!(resp.body["logged"], true);
    }
}
