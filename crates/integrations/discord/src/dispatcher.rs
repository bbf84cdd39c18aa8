use std::sync::Arc;

use chrono::Utc;
use postcord_core::{Context, EmbedContent, Hooks, ItemId, NoopHooks, SendReport, Settings};
use postcord_format::{Formatter, decode_entities};
use postcord_provider::{DeliveryResult, DynTransport, OutboundRequest, TransportError};
use postcord_state::MarkerStore;
use tracing::{debug, instrument, warn};

use crate::config::DispatchConfig;
use crate::error::DiscordError;
use crate::resolve::resolve_webhook_url;
use crate::types::WebhookPayload;

/// Shared collaborators of every [`Dispatcher`].
#[derive(Clone)]
pub struct DispatchServices {
    pub settings: Arc<Settings>,
    pub transport: Arc<dyn DynTransport>,
    pub markers: Arc<dyn MarkerStore>,
    pub hooks: Arc<dyn Hooks>,
}

impl DispatchServices {
    /// Services with no-op hooks.
    pub fn new(
        settings: Arc<Settings>,
        transport: Arc<dyn DynTransport>,
        markers: Arc<dyn MarkerStore>,
    ) -> Self {
        Self {
            settings,
            transport,
            markers,
            hooks: Arc::new(NoopHooks),
        }
    }

    #[must_use]
    pub fn with_hooks(mut self, hooks: Arc<dyn Hooks>) -> Self {
        self.hooks = hooks;
        self
    }
}

impl std::fmt::Debug for DispatchServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchServices")
            .field("settings", &self.settings)
            .field("transport", &self.transport.name())
            .finish_non_exhaustive()
    }
}

/// Sends one message per [`process`](Self::process) call to the webhook
/// resolved for its context.
///
/// A dispatcher is cheap to build and meant to be created per outbound
/// message. Delivery is attempted once; nothing is queued or retried.
#[derive(Debug)]
pub struct Dispatcher {
    config: DispatchConfig,
    services: DispatchServices,
    formatter: Formatter,
}

impl Dispatcher {
    /// Create a dispatcher for `context`, seeded with the bot identity from
    /// the settings.
    pub fn new(context: impl Into<Context>, services: DispatchServices) -> Self {
        let config = DispatchConfig::from_settings(&services.settings, context);
        let formatter = Formatter::new(services.settings.clone());
        Self {
            config,
            services,
            formatter,
        }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn set_username(&mut self, raw: &str) {
        self.config.set_username(raw);
    }

    pub fn set_avatar(&mut self, raw: &str) {
        self.config.set_avatar(raw);
    }

    pub fn set_token(&mut self, raw: &str) {
        self.config.set_token(raw);
    }

    /// Change the context. The webhook URL is re-resolved on the next send.
    pub fn set_context(&mut self, context: impl Into<Context>) {
        self.config.set_context(context);
    }

    /// Set an explicit webhook URL, overriding context and default webhooks.
    pub fn set_webhook_url(&mut self, url: &str) {
        self.config.set_webhook_url(url);
    }

    /// The URL the next [`process`](Self::process) call would post to.
    pub fn webhook_url(&self) -> String {
        resolve_webhook_url(
            self.config.context(),
            self.config.explicit_webhook_url(),
            &self.services.settings,
            self.services.hooks.as_ref(),
        )
    }

    /// Build the wire payload. The embed is included only when it carries
    /// at least one value.
    pub fn build_payload(&self, content: &str, embed: &EmbedContent) -> WebhookPayload {
        let embeds = (!embed.is_empty()).then(|| vec![self.formatter.embed(embed, Utc::now())]);
        WebhookPayload {
            content: decode_entities(content),
            username: self.config.username().to_owned(),
            avatar_url: self.config.avatar_url().to_owned(),
            embeds,
        }
    }

    /// Turn content into a ready-to-deliver request without any I/O.
    ///
    /// Runs the payload hooks. Fails with a configuration error when no
    /// webhook URL resolves.
    pub fn prepare(
        &self,
        content: &str,
        embed: &EmbedContent,
    ) -> Result<OutboundRequest, TransportError> {
        let context = self.config.context();
        let hooks = self.services.hooks.as_ref();

        let url = self.webhook_url();
        if url.is_empty() {
            return Err(DiscordError::MissingWebhookUrl(context.to_string()).into());
        }

        hooks.before_payload(context, content, embed);
        let payload = self.build_payload(content, embed);
        let mut body = serde_json::to_value(&payload)
            .map_err(|e| DiscordError::InvalidPayload(format!("failed to serialize payload: {e}")))?;
        hooks.filter_payload(context, &mut body);

        Ok(OutboundRequest::new(url, self.config.token(), body))
    }

    /// Send `content` and `embed` to the resolved webhook.
    ///
    /// On success a sent marker is recorded for `item` when it is non-zero.
    /// Failures are returned as-is and never mark the item. A failure to
    /// record the marker is logged and does not turn a delivered message into
    /// an error.
    #[instrument(skip_all, fields(context = %self.config.context(), item = %item))]
    pub async fn process(&self, content: &str, embed: &EmbedContent, item: ItemId) -> DeliveryResult {
        let logging = self.services.settings.features.logging;
        let context = self.config.context();
        let hooks = self.services.hooks.as_ref();

        let request = match self.prepare(content, embed) {
            Ok(request) => request,
            Err(e) => {
                outcome!(logging, error = %e, "request not sent");
                hooks.after_send(
                    context,
                    &SendReport {
                        url: "",
                        status: None,
                        error: Some(&e.to_string()),
                    },
                );
                return Err(e);
            }
        };

        hooks.before_send(context, &request.url, &request.body);
        outcome!(logging, body = %request.body, "sending request");

        let result = self.services.transport.deliver(&request).await;

        let error = result.as_ref().err().map(ToString::to_string);
        hooks.after_send(
            context,
            &SendReport {
                url: &request.url,
                status: match &result {
                    Ok(response) => Some(response.status),
                    Err(e) => e.status(),
                },
                error: error.as_deref(),
            },
        );

        match &result {
            Ok(response) => {
                outcome!(
                    logging,
                    status = response.status,
                    transport = self.services.transport.name(),
                    "request sent"
                );
                if item.is_trackable() {
                    self.mark_sent(item).await;
                }
            }
            Err(e) => {
                outcome!(logging, error = %e, retryable = e.is_retryable(), "request not sent");
            }
        }

        result
    }

    async fn mark_sent(&self, item: ItemId) {
        match self.services.markers.mark_sent(item).await {
            Ok(true) => debug!(item = %item, "sent marker recorded"),
            Ok(false) => debug!(item = %item, "sent marker already present"),
            Err(e) => warn!(item = %item, error = %e, "failed to record sent marker"),
        }
    }
}
