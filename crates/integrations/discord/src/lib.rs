//! Webhook dispatcher for Postcord.
//!
//! The [`Dispatcher`] turns prepared content and an optional embed into a
//! webhook request, hands it to a transport, and records a sent marker for
//! the content item once delivery succeeded. [`HttpTransport`] posts to
//! [Discord webhooks](https://discord.com/developers/docs/resources/webhook).
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use postcord_core::{EmbedContent, ItemId, Settings};
//! use postcord_discord::{DispatchServices, Dispatcher, HttpTransport};
//! use postcord_state_memory::MemoryMarkerStore;
//!
//! # async fn run() {
//! let settings = Arc::new(Settings::load("postcord.toml").unwrap());
//! let services = DispatchServices::new(
//!     settings.clone(),
//!     Arc::new(HttpTransport::from_settings(&settings.http)),
//!     Arc::new(MemoryMarkerStore::new()),
//! );
//! let dispatcher = Dispatcher::new("post", services);
//! let _ = dispatcher
//!     .process("Hello!", &EmbedContent::new(), ItemId::new(42))
//!     .await;
//! # }
//! ```

#[doc(hidden)]
pub use tracing as __tracing;

/// Emit a dispatch outcome record: `info` when the logging toggle is on,
/// `debug` otherwise.
///
/// ```rust
/// # let logging = true;
/// postcord_discord::outcome!(logging, context = "post", "request sent");
/// ```
#[macro_export]
macro_rules! outcome {
    ($enabled:expr, $($arg:tt)+) => {
        if $enabled {
            $crate::__tracing::info!($($arg)+);
        } else {
            $crate::__tracing::debug!($($arg)+);
        }
    };
}

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod resolve;
pub mod transport;
pub mod types;

pub use config::DispatchConfig;
pub use dispatcher::{DispatchServices, Dispatcher};
pub use error::DiscordError;
pub use resolve::resolve_webhook_url;
pub use transport::HttpTransport;
pub use types::{WebhookPayload, WebhookResponse};
