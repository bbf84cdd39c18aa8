//! Domain events and the content they carry.
//!
//! Events arrive from the host system (or the CLI as JSON) already resolved
//! to plain values: display names, permalinks and formatted addresses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use postcord_core::ItemId;

use crate::capability::Integration;

/// A published blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    /// Raw post body; may contain markup and shortcodes.
    #[serde(default)]
    pub content: String,
    /// Author display name.
    pub author: String,
    pub url: String,
    #[serde(default = "default_post_type")]
    pub post_type: String,
    /// Creation time.
    pub date: DateTime<Utc>,
    /// Featured image URL.
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_revision: bool,
}

fn default_post_type() -> String {
    "post".to_owned()
}

/// A saved store product.
///
/// For variable products the host reports the lowest variation prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub short_description: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub sku: String,
    /// Current selling price.
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub regular_price: f64,
    #[serde(default)]
    pub sale_price: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub is_virtual: bool,
    /// Formatted dimensions, e.g. `10 × 5 × 2 cm`.
    #[serde(default)]
    pub dimensions: String,
    /// Formatted weight, e.g. `1.2 kg`.
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_revision: bool,
}

impl Product {
    pub fn is_on_sale(&self) -> bool {
        self.sale_price.is_some_and(|sale| sale > 0.0 && sale < self.regular_price)
    }
}

fn default_currency() -> String {
    "$".to_owned()
}

/// One purchased line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,
}

/// A newly created store order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub number: String,
    pub status: String,
    /// Billing full name.
    pub customer: String,
    pub total: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub date: DateTime<Utc>,
    /// Admin URL of the order.
    #[serde(default)]
    pub edit_url: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub needs_shipping: bool,
    #[serde(default)]
    pub shipping_total: f64,
    #[serde(default)]
    pub shipping_method: String,
    #[serde(default)]
    pub total_tax: f64,
    #[serde(default)]
    pub payment_method: String,
    /// Formatted billing address; lines separated by `<br/>` or newlines.
    #[serde(default)]
    pub billing_address: String,
    #[serde(default)]
    pub billing_email: String,
    #[serde(default)]
    pub billing_phone: String,
    #[serde(default)]
    pub shipping_address: String,
}

impl Order {
    /// Total number of units purchased.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// A submitted form value, in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormEntry {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// Contact Form 7 submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cf7Submission {
    #[serde(default)]
    pub form_title: String,
    pub fields: Vec<FormEntry>,
}

/// Gravity Forms field with its label and rendered display value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GravityField {
    pub label: String,
    #[serde(default)]
    pub display_value: String,
}

/// Gravity Forms entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GravityFormsEntry {
    #[serde(default)]
    pub form_title: String,
    pub fields: Vec<GravityField>,
}

/// Jetpack contact form submission. Keys carry `N_` numbering prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JetpackSubmission {
    #[serde(default)]
    pub post_id: u64,
    pub values: Vec<FormEntry>,
}

/// A domain event that may trigger a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    PostPublished(Post),
    ProductSaved(Product),
    OrderCreated(Order),
    ContactForm7Submitted(Cf7Submission),
    GravityFormsEntryCreated(GravityFormsEntry),
    JetpackFormSubmitted(JetpackSubmission),
}

impl Event {
    /// Integration responsible for this event.
    pub fn integration(&self) -> Integration {
        match self {
            Self::PostPublished(_) => Integration::Posts,
            Self::ProductSaved(_) => Integration::WooCommerceProducts,
            Self::OrderCreated(_) => Integration::WooCommerceOrders,
            Self::ContactForm7Submitted(_) => Integration::ContactForm7,
            Self::GravityFormsEntryCreated(_) => Integration::GravityForms,
            Self::JetpackFormSubmitted(_) => Integration::JetpackContactForm,
        }
    }

    /// Content item guarded by a sent marker. Orders and form submissions
    /// are one-shot events and carry none.
    pub fn item_id(&self) -> ItemId {
        match self {
            Self::PostPublished(post) => ItemId::new(post.id),
            Self::ProductSaved(product) => ItemId::new(product.id),
            Self::OrderCreated(_)
            | Self::ContactForm7Submitted(_)
            | Self::GravityFormsEntryCreated(_)
            | Self::JetpackFormSubmitted(_) => ItemId::NONE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PostPublished(_) => "post_published",
            Self::ProductSaved(_) => "product_saved",
            Self::OrderCreated(_) => "order_created",
            Self::ContactForm7Submitted(_) => "contact_form7_submitted",
            Self::GravityFormsEntryCreated(_) => "gravity_forms_entry_created",
            Self::JetpackFormSubmitted(_) => "jetpack_form_submitted",
        }
    }
}

/// Format an amount with its currency symbol, two decimals.
pub(crate) fn format_money(amount: f64, currency: &str) -> String {
    format!("{currency}{amount:.2}")
}
