//! Core types shared by every Postcord crate: configuration, embed content,
//! context slugs, sanitizers, and the extension-point trait.

pub mod embed;
pub mod error;
pub mod hooks;
pub mod sanitize;
pub mod settings;
pub mod types;

pub use embed::{EmbedContent, EmbedField};
pub use error::SettingsError;
pub use hooks::{Hooks, NoopHooks, SendReport};
pub use settings::{
    BotConfig, FeatureConfig, FormattingConfig, HttpConfig, IntegrationConfig, MarkerConfig,
    Settings, SiteConfig, TemplateConfig, WebhookConfig,
};
pub use types::{ContentKind, Context, ItemId};
