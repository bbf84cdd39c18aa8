use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use postcord_core::IntegrationConfig;

use crate::adapter::Adapter;
use crate::capability::{Capabilities, Integration};
use crate::event::Event;
use crate::forms::{ContactForm7Adapter, GravityFormsAdapter, JetpackFormAdapter};
use crate::order::OrderAdapter;
use crate::post::PostAdapter;
use crate::product::ProductAdapter;

/// Adapters keyed by the integration they serve.
///
/// Built once at startup and then shared immutably.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: BTreeMap<Integration, Arc<dyn Adapter>>,
}

impl AdapterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the built-in adapters that are both enabled in `config` and
    /// available according to `capabilities`.
    pub fn from_settings(config: &IntegrationConfig, capabilities: &dyn Capabilities) -> Self {
        let builtin: [Arc<dyn Adapter>; 6] = [
            Arc::new(PostAdapter),
            Arc::new(ContactForm7Adapter),
            Arc::new(GravityFormsAdapter),
            Arc::new(JetpackFormAdapter),
            Arc::new(ProductAdapter),
            Arc::new(OrderAdapter),
        ];

        let mut registry = Self::new();
        for adapter in builtin {
            let integration = adapter.integration();
            let enabled = integration.is_enabled(config);
            let available = capabilities.is_available(integration);
            debug!(%integration, enabled, available, "adapter activation");
            if enabled && available {
                registry.register(adapter);
            }
        }
        registry
    }

    /// Register an adapter under its integration, replacing any previous
    /// one.
    pub fn register(&mut self, adapter: Arc<dyn Adapter>) {
        self.adapters.insert(adapter.integration(), adapter);
    }

    pub fn get(&self, integration: Integration) -> Option<Arc<dyn Adapter>> {
        self.adapters.get(&integration).cloned()
    }

    /// The adapter responsible for `event`, if registered.
    pub fn find(&self, event: &Event) -> Option<Arc<dyn Adapter>> {
        self.get(event.integration())
    }

    /// Registered integrations, in a stable order.
    pub fn list(&self) -> Vec<Integration> {
        self.adapters.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{AllAvailable, StaticCapabilities};

    #[test]
    fn empty_registry() {
        let registry = AdapterRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.list().is_empty());
    }

    #[test]
    fn defaults_register_posts_only() {
        let registry = AdapterRegistry::from_settings(&IntegrationConfig::default(), &AllAvailable);
        assert_eq!(registry.list(), [Integration::Posts]);
    }

    #[test]
    fn enabled_but_unavailable_is_not_registered() {
        let config = IntegrationConfig {
            contact_form_7: true,
            woocommerce_orders: true,
            ..IntegrationConfig::default()
        };
        let caps = StaticCapabilities::new([Integration::Posts, Integration::WooCommerceOrders]);
        let registry = AdapterRegistry::from_settings(&config, &caps);
        assert_eq!(
            registry.list(),
            [Integration::Posts, Integration::WooCommerceOrders]
        );
        assert!(registry.get(Integration::ContactForm7).is_none());
    }

    #[test]
    fn register_replaces_existing() {
        let mut registry = AdapterRegistry::new();
        registry.register(Arc::new(PostAdapter));
        registry.register(Arc::new(PostAdapter));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get(Integration::Posts).unwrap().context().as_str(),
            "post"
        );
    }
}
