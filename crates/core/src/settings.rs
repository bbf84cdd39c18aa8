use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::SettingsError;
use crate::types::{ContentKind, Context};

/// Top-level Postcord configuration, loaded from a TOML file.
///
/// Every section has defaults, so an empty document is a valid (if inert)
/// configuration. The value is built once and handed to the formatter,
/// dispatcher and adapters explicitly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Bot identity sent with each message.
    #[serde(default)]
    pub bot: BotConfig,
    /// Default and per-context webhook URLs.
    #[serde(default)]
    pub webhooks: WebhookConfig,
    /// Message templates per content type.
    #[serde(default)]
    pub templates: TemplateConfig,
    /// Site identity used for embed defaults and footer.
    #[serde(default)]
    pub site: SiteConfig,
    /// Behaviour toggles.
    #[serde(default)]
    pub features: FeatureConfig,
    /// Which optional integrations are enabled.
    #[serde(default)]
    pub integrations: IntegrationConfig,
    /// Excerpt generation.
    #[serde(default)]
    pub formatting: FormattingConfig,
    /// Outbound HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
    /// Sent-marker persistence backend.
    #[serde(default)]
    pub markers: MarkerConfig,
}

impl Settings {
    /// Parse settings from a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self, SettingsError> {
        toml::from_str(contents).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Load settings from a TOML file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&contents)
    }

    /// The per-context webhook override, if one is configured and non-empty.
    #[must_use]
    pub fn context_webhook_url(&self, context: &Context) -> Option<&str> {
        if context.is_empty() {
            return None;
        }
        self.webhooks
            .contexts
            .get(context.as_str())
            .map(String::as_str)
            .filter(|url| !url.trim().is_empty())
    }

    /// The configured template for a content type (may be empty).
    #[must_use]
    pub fn template(&self, kind: ContentKind) -> &str {
        match kind {
            ContentKind::Post => &self.templates.post,
            ContentKind::Product => &self.templates.product,
            ContentKind::Order => &self.templates.order,
        }
    }
}

/// Bot identity.
#[derive(Clone, Default, Deserialize)]
pub struct BotConfig {
    /// Display name.
    #[serde(default)]
    pub username: String,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: String,
    /// Bot credential sent as `Authorization: Bot <token>`.
    #[serde(default)]
    pub token: String,
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("username", &self.username)
            .field("avatar_url", &self.avatar_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Webhook targets.
///
/// ```toml
/// [webhooks]
/// default = "https://discord.com/api/webhooks/1/abc"
///
/// [webhooks.contexts]
/// product = "https://discord.com/api/webhooks/2/def"
/// ```
#[derive(Clone, Default, Deserialize)]
pub struct WebhookConfig {
    /// Fallback webhook used when no context override applies.
    #[serde(default)]
    pub default: String,
    /// Per-context overrides keyed by context slug.
    #[serde(default)]
    pub contexts: HashMap<String, String>,
}

impl std::fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut contexts: Vec<&str> = self.contexts.keys().map(String::as_str).collect();
        contexts.sort_unstable();
        f.debug_struct("WebhookConfig")
            .field("default", &"[REDACTED]")
            .field("contexts", &contexts)
            .finish()
    }
}

/// Message templates. Placeholders are written as `%name%`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateConfig {
    #[serde(default)]
    pub post: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub order: String,
}

/// Site identity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    /// Site name; default embed author and footer text.
    #[serde(default)]
    pub name: String,
    /// Site root URL; default embed link.
    #[serde(default)]
    pub url: String,
    /// Site icon; embed footer icon.
    #[serde(default)]
    pub icon_url: String,
}

/// Behaviour toggles.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct FeatureConfig {
    /// Emit dispatch outcome records at `info` level.
    #[serde(default)]
    pub logging: bool,
    /// Prefix messages with `@everyone`.
    #[serde(default)]
    pub mention_everyone: bool,
    /// Send plain content only, never embeds.
    #[serde(default)]
    pub disable_embed: bool,
}

/// Optional integrations.
#[derive(Debug, Clone, Deserialize)]
pub struct IntegrationConfig {
    /// Blog post publishing. Always available.
    #[serde(default = "default_true")]
    pub posts: bool,
    #[serde(default)]
    pub contact_form_7: bool,
    #[serde(default)]
    pub gravity_forms: bool,
    #[serde(default)]
    pub jetpack_contact_form: bool,
    #[serde(default)]
    pub woocommerce_products: bool,
    #[serde(default)]
    pub woocommerce_orders: bool,
    /// Order statuses that trigger a notification.
    #[serde(default = "default_order_statuses")]
    pub allowed_order_statuses: Vec<String>,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            posts: true,
            contact_form_7: false,
            gravity_forms: false,
            jetpack_contact_form: false,
            woocommerce_products: false,
            woocommerce_orders: false,
            allowed_order_statuses: default_order_statuses(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_order_statuses() -> Vec<String> {
    vec![
        "on-hold".to_owned(),
        "processing".to_owned(),
        "completed".to_owned(),
    ]
}

/// Excerpt settings.
#[derive(Debug, Clone, Deserialize)]
pub struct FormattingConfig {
    /// Maximum number of words in a generated description.
    #[serde(default = "default_excerpt_length")]
    pub excerpt_length: usize,
    /// Marker appended to truncated descriptions.
    #[serde(default = "default_excerpt_more")]
    pub excerpt_more: String,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            excerpt_length: default_excerpt_length(),
            excerpt_more: default_excerpt_more(),
        }
    }
}

fn default_excerpt_length() -> usize {
    55
}

fn default_excerpt_more() -> String {
    " ...".to_owned()
}

/// Outbound HTTP settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_timeout_seconds() -> u64 {
    30
}

/// Sent-marker backend selection.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkerConfig {
    /// `"memory"` or `"file"`.
    #[serde(default = "default_marker_backend")]
    pub backend: String,
    /// Path of the marker file for the `"file"` backend.
    pub path: Option<String>,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            backend: default_marker_backend(),
            path: None,
        }
    }
}

fn default_marker_backend() -> String {
    "memory".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert!(settings.bot.username.is_empty());
        assert!(settings.webhooks.default.is_empty());
        assert!(!settings.features.logging);
        assert!(settings.integrations.posts);
        assert!(!settings.integrations.woocommerce_orders);
        assert_eq!(
            settings.integrations.allowed_order_statuses,
            ["on-hold", "processing", "completed"]
        );
        assert_eq!(settings.formatting.excerpt_length, 55);
        assert_eq!(settings.formatting.excerpt_more, " ...");
        assert_eq!(settings.http.timeout_seconds, 30);
        assert_eq!(settings.markers.backend, "memory");
    }

    #[test]
    fn full_document() {
        let toml = r#"
            [bot]
            username = "Postcord"
            avatar_url = "https://example.com/a.png"
            token = "abc"

            [webhooks]
            default = "https://discord.com/api/webhooks/1/default"

            [webhooks.contexts]
            product = "https://discord.com/api/webhooks/2/product"
            order = ""

            [templates]
            post = "%title% by %author%"

            [site]
            name = "My Blog"
            url = "https://blog.example.com"

            [features]
            logging = true
            mention_everyone = true

            [integrations]
            woocommerce_orders = true
            allowed_order_statuses = ["processing"]

            [markers]
            backend = "file"
            path = "/tmp/markers.json"
        "#;

        let settings = Settings::from_toml(toml).unwrap();
        assert_eq!(settings.bot.username, "Postcord");
        assert_eq!(settings.template(ContentKind::Post), "%title% by %author%");
        assert_eq!(settings.template(ContentKind::Order), "");
        assert!(settings.features.logging);
        assert!(settings.features.mention_everyone);
        assert!(!settings.features.disable_embed);
        assert_eq!(settings.integrations.allowed_order_statuses, ["processing"]);
        assert_eq!(settings.markers.path.as_deref(), Some("/tmp/markers.json"));
        assert_eq!(
            settings.context_webhook_url(&Context::new("product")),
            Some("https://discord.com/api/webhooks/2/product")
        );
    }

    #[test]
    fn blank_context_override_is_ignored() {
        let settings = Settings::from_toml(
            r#"
            [webhooks.contexts]
            order = "  "
            "#,
        )
        .unwrap();
        assert!(settings.context_webhook_url(&Context::new("order")).is_none());
        assert!(settings.context_webhook_url(&Context::default()).is_none());
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = Settings::from_toml("[bot\nusername = 1").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let settings = Settings::load("/nonexistent/postcord.toml").unwrap();
        assert_eq!(settings.markers.backend, "memory");
    }

    #[test]
    fn debug_redacts_secrets() {
        let settings = Settings::from_toml(
            r#"
            [bot]
            token = "super-secret-token"

            [webhooks]
            default = "https://discord.com/api/webhooks/1/hidden-path"
            "#,
        )
        .unwrap();
        let debug = format!("{settings:?}");
        assert!(!debug.contains("super-secret-token"));
        assert!(!debug.contains("hidden-path"));
        assert!(debug.contains("[REDACTED]"));
    }
}
