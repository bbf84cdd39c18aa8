use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use postcord_core::IntegrationConfig;

/// An integration an adapter serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Integration {
    Posts,
    #[serde(rename = "contact_form_7")]
    ContactForm7,
    GravityForms,
    JetpackContactForm,
    #[serde(rename = "woocommerce_products")]
    WooCommerceProducts,
    #[serde(rename = "woocommerce_orders")]
    WooCommerceOrders,
}

impl Integration {
    pub const ALL: [Self; 6] = [
        Self::Posts,
        Self::ContactForm7,
        Self::GravityForms,
        Self::JetpackContactForm,
        Self::WooCommerceProducts,
        Self::WooCommerceOrders,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::ContactForm7 => "contact_form_7",
            Self::GravityForms => "gravity_forms",
            Self::JetpackContactForm => "jetpack_contact_form",
            Self::WooCommerceProducts => "woocommerce_products",
            Self::WooCommerceOrders => "woocommerce_orders",
        }
    }

    /// Whether the configuration switches this integration on.
    pub fn is_enabled(self, config: &IntegrationConfig) -> bool {
        match self {
            Self::Posts => config.posts,
            Self::ContactForm7 => config.contact_form_7,
            Self::GravityForms => config.gravity_forms,
            Self::JetpackContactForm => config.jetpack_contact_form,
            Self::WooCommerceProducts => config.woocommerce_products,
            Self::WooCommerceOrders => config.woocommerce_orders,
        }
    }
}

impl fmt::Display for Integration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability detection supplied by the host environment: is the system an
/// integration talks to actually installed?
pub trait Capabilities: Send + Sync {
    fn is_available(&self, integration: Integration) -> bool;
}

/// Every integration is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllAvailable;

impl Capabilities for AllAvailable {
    fn is_available(&self, _integration: Integration) -> bool {
        true
    }
}

/// A fixed set of available integrations.
#[derive(Debug, Clone, Default)]
pub struct StaticCapabilities {
    available: HashSet<Integration>,
}

impl StaticCapabilities {
    pub fn new(available: impl IntoIterator<Item = Integration>) -> Self {
        Self {
            available: available.into_iter().collect(),
        }
    }
}

impl Capabilities for StaticCapabilities {
    fn is_available(&self, integration: Integration) -> bool {
        self.available.contains(&integration)
    }
}
