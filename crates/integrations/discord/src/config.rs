use postcord_core::Context;
use postcord_core::Settings;
use postcord_core::sanitize::{sanitize_key, sanitize_text_field, sanitize_url};

/// Per-dispatch configuration: bot identity, credential, context and an
/// optional explicit webhook URL.
///
/// Every setter stores a sanitized copy of its input; malformed values are
/// clamped, never rejected. The explicit URL is kept as given and only
/// sanitized once resolved (see [`resolve_webhook_url`](crate::resolve_webhook_url)).
#[derive(Clone, Default)]
pub struct DispatchConfig {
    username: String,
    avatar_url: String,
    token: String,
    context: Context,
    webhook_url: String,
}

impl std::fmt::Debug for DispatchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchConfig")
            .field("username", &self.username)
            .field("avatar_url", &self.avatar_url)
            .field("token", &"[REDACTED]")
            .field("context", &self.context)
            .field("webhook_url", &"[REDACTED]")
            .finish()
    }
}

impl DispatchConfig {
    /// Configuration seeded from the bot identity in `settings`.
    pub fn from_settings(settings: &Settings, context: impl Into<Context>) -> Self {
        let mut config = Self {
            context: context.into(),
            ..Self::default()
        };
        config.set_username(&settings.bot.username);
        config.set_avatar(&settings.bot.avatar_url);
        config.set_token(&settings.bot.token);
        config
    }

    /// Display name with markup, control characters and surrounding
    /// whitespace removed.
    pub fn set_username(&mut self, raw: &str) {
        self.username = sanitize_text_field(raw);
    }

    /// Avatar URL; anything that is not an absolute `http(s)` URL becomes
    /// empty.
    pub fn set_avatar(&mut self, raw: &str) {
        self.avatar_url = sanitize_url(raw);
    }

    /// Credential reduced to lower-case alphanumerics, `_` and `-`.
    pub fn set_token(&mut self, raw: &str) {
        self.token = sanitize_key(raw);
    }

    pub fn set_context(&mut self, context: impl Into<Context>) {
        self.context = context.into();
    }

    /// Explicit target URL. Takes precedence over context overrides and the
    /// default webhook. An empty string clears it.
    pub fn set_webhook_url(&mut self, url: &str) {
        self.webhook_url = url.trim().to_owned();
    }

    #[must_use]
    pub fn with_username(mut self, raw: &str) -> Self {
        self.set_username(raw);
        self
    }

    #[must_use]
    pub fn with_avatar(mut self, raw: &str) -> Self {
        self.set_avatar(raw);
        self
    }

    #[must_use]
    pub fn with_token(mut self, raw: &str) -> Self {
        self.set_token(raw);
        self
    }

    #[must_use]
    pub fn with_webhook_url(mut self, url: &str) -> Self {
        self.set_webhook_url(url);
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The explicit URL, unresolved. Empty when none was set.
    pub fn explicit_webhook_url(&self) -> &str {
        &self.webhook_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_stripped() {
        let mut config = DispatchConfig::default();
        config.set_username("test");
        assert_eq!(config.username(), "test");
        config.set_username("<script>alert();</script>This is a test");
        assert_eq!(config.username(), "This is a test");
    }

    #[test]
    fn avatar_is_url_sanitized() {
        let mut config = DispatchConfig::default();
        config.set_avatar("https://this.site/image.jpg");
        assert_eq!(config.avatar_url(), "https://this.site/image.jpg");
        config.set_avatar("http:/image.com/<script>alert()</script>.jpg");
        assert_eq!(config.avatar_url(), "http:/image.com/scriptalert()/script.jpg");
        config.set_avatar("javascript:alert(1)");
        assert_eq!(config.avatar_url(), "");
    }

    #[test]
    fn token_is_key_sanitized() {
        let mut config = DispatchConfig::default();
        config.set_token("abcdef");
        assert_eq!(config.token(), "abcdef");
        config.set_token("Not a Token with-dashes");
        assert_eq!(config.token(), "notatokenwith-dashes");
    }

    #[test]
    fn context_is_sanitized() {
        let mut config = DispatchConfig::default();
        config.set_context("test context");
        assert_eq!(config.context().as_str(), "testcontext");
    }

    #[test]
    fn seeded_from_settings() {
        let settings = Settings::from_toml(
            r#"
            [bot]
            username = " <b>Postcord</b> "
            avatar_url = "https://blog.test/avatar.png"
            token = "ABC-123"
            "#,
        )
        .unwrap();
        let config = DispatchConfig::from_settings(&settings, "post");
        assert_eq!(config.username(), "Postcord");
        assert_eq!(config.avatar_url(), "https://blog.test/avatar.png");
        assert_eq!(config.token(), "abc-123");
        assert_eq!(config.context().as_str(), "post");
        assert_eq!(config.explicit_webhook_url(), "");
    }

    #[test]
    fn debug_redacts_token_and_url() {
        let config = DispatchConfig::default()
            .with_token("hidden-token")
            .with_webhook_url("https://discord.com/api/webhooks/1/test-placeholder");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hidden-token"));
        assert!(!debug.contains("test-placeholder"));
    }
}
