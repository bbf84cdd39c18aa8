use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{instrument, warn};

use postcord_discord::{DispatchServices, Dispatcher, outcome};
use postcord_format::Formatter;
use postcord_provider::{DeliveryResult, TransportError, TransportResponse};

use crate::adapter::{Decision, Notification, PrepareContext, SkipReason};
use crate::event::Event;
use crate::registry::AdapterRegistry;

/// What became of an event.
#[derive(Debug)]
pub enum Outcome {
    Skipped(SkipReason),
    Sent(TransportResponse),
    Failed(TransportError),
}

impl Outcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }
}

/// Connects adapters to the dispatcher.
///
/// [`decide`](Self::decide) runs eligibility and formatting without touching
/// the network; [`deliver`](Self::deliver) sends a prepared notification.
/// [`handle`](Self::handle) does both and never fails: delivery problems are
/// logged and reported in the returned [`Outcome`].
pub struct Bridge {
    registry: AdapterRegistry,
    services: DispatchServices,
    formatter: Formatter,
}

impl Bridge {
    pub fn new(registry: AdapterRegistry, services: DispatchServices) -> Self {
        let formatter = Formatter::new(Arc::clone(&services.settings));
        Self {
            registry,
            services,
            formatter,
        }
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    fn logging(&self) -> bool {
        self.services.settings.features.logging
    }

    /// Decide whether `event` notifies, as of `now`.
    pub async fn decide(&self, event: &Event, now: DateTime<Utc>) -> Decision {
        let Some(adapter) = self.registry.find(event) else {
            return Decision::Skip(SkipReason::NoAdapter(event.name()));
        };

        let item = event.item_id();
        let already_sent = if item.is_trackable() {
            match self.services.markers.is_sent(item).await {
                Ok(sent) => sent,
                Err(e) => {
                    warn!(item = %item, error = %e, "failed to read sent marker");
                    return Decision::Skip(SkipReason::MarkerUnavailable);
                }
            }
        } else {
            false
        };

        let cx = PrepareContext {
            formatter: &self.formatter,
            hooks: self.services.hooks.as_ref(),
            now,
            already_sent,
        };
        adapter.prepare(event, &cx)
    }

    /// Send a prepared notification through a fresh dispatcher.
    pub async fn deliver(&self, notification: &Notification) -> DeliveryResult {
        let dispatcher = Dispatcher::new(notification.context.clone(), self.services.clone());
        dispatcher
            .process(&notification.content, &notification.embed, notification.item)
            .await
    }

    /// Decide and, when eligible, deliver. Never returns an error.
    #[instrument(skip_all, fields(event = event.name(), item = %event.item_id()))]
    pub async fn handle(&self, event: &Event) -> Outcome {
        let notification = match self.decide(event, Utc::now()).await {
            Decision::Notify(notification) => notification,
            Decision::Skip(reason) => {
                outcome!(self.logging(), reason = %reason, "event skipped");
                return Outcome::Skipped(reason);
            }
        };

        outcome!(self.logging(), context = %notification.context, "event eligible");
        match self.deliver(&notification).await {
            Ok(response) => Outcome::Sent(response),
            Err(e) => Outcome::Failed(e),
        }
    }
}
