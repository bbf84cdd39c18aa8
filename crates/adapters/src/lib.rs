//! Event adapters for Postcord.
//!
//! Each adapter covers one integration (blog posts, store products and
//! orders, three form plugins). Given a domain [`Event`] it decides whether
//! the event is eligible and, if so, prepares a [`Notification`]. Preparing
//! is pure; the [`Bridge`] hands notifications to the dispatcher and absorbs
//! delivery failures so the originating event never fails because of them.

pub mod adapter;
pub mod bridge;
pub mod capability;
pub mod eligibility;
pub mod event;
pub mod forms;
pub mod order;
pub mod post;
pub mod product;
pub mod registry;

pub use adapter::{Adapter, Decision, Notification, PrepareContext, SkipReason};
pub use bridge::{Bridge, Outcome};
pub use capability::{AllAvailable, Capabilities, Integration, StaticCapabilities};
pub use eligibility::is_new_item;
pub use event::{
    Cf7Submission, Event, FormEntry, GravityField, GravityFormsEntry, JetpackSubmission,
    LineItem, Order, Post, Product,
};
pub use forms::{ContactForm7Adapter, GravityFormsAdapter, JetpackFormAdapter};
pub use order::OrderAdapter;
pub use post::PostAdapter;
pub use product::ProductAdapter;
pub use registry::AdapterRegistry;
