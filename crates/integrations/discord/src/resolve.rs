use postcord_core::sanitize::sanitize_url;
use postcord_core::{Context, Hooks, Settings};

/// Resolve the webhook URL a dispatch for `context` is sent to.
///
/// The first non-empty of the explicit URL, the context's override and the
/// default webhook is chosen, passed through the per-context then the global
/// URL filter, and sanitized. The result is empty when nothing resolved or
/// the URL was unusable.
///
/// Pure apart from the hooks; the same inputs always give the same URL.
pub fn resolve_webhook_url(
    context: &Context,
    explicit: &str,
    settings: &Settings,
    hooks: &dyn Hooks,
) -> String {
    let chosen = if explicit.trim().is_empty() {
        settings
            .context_webhook_url(context)
            .unwrap_or(&settings.webhooks.default)
    } else {
        explicit
    };

    let url = hooks.filter_context_webhook_url(context, chosen.trim().to_owned());
    let url = hooks.filter_webhook_url(url);
    sanitize_url(&url)
}

#[cfg(test)]
mod tests {
    use postcord_core::NoopHooks;

    use super::*;

    fn settings() -> Settings {
        Settings::from_toml(
            r#"
            [webhooks]
            default = "https://discord.com/api/webhooks/1/default"

            [webhooks.contexts]
            product = "https://discord.com/api/webhooks/2/product"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn context_override_when_no_explicit_url() {
        let url = resolve_webhook_url(&Context::new("product"), "", &settings(), &NoopHooks);
        assert_eq!(url, "https://discord.com/api/webhooks/2/product");
    }

    #[test]
    fn explicit_url_wins_over_override() {
        let url = resolve_webhook_url(
            &Context::new("product"),
            "https://discord.com/api/webhooks/3/explicit",
            &settings(),
            &NoopHooks,
        );
        assert_eq!(url, "https://discord.com/api/webhooks/3/explicit");
    }

    #[test]
    fn default_when_context_has_no_override() {
        let url = resolve_webhook_url(&Context::new("post"), "", &settings(), &NoopHooks);
        assert_eq!(url, "https://discord.com/api/webhooks/1/default");
        let url = resolve_webhook_url(&Context::default(), "", &settings(), &NoopHooks);
        assert_eq!(url, "https://discord.com/api/webhooks/1/default");
    }

    #[test]
    fn empty_when_nothing_configured() {
        let url = resolve_webhook_url(&Context::new("post"), "", &Settings::default(), &NoopHooks);
        assert_eq!(url, "");
    }

    #[test]
    fn result_is_sanitized() {
        let url = resolve_webhook_url(
            &Context::new("post"),
            "https://discord.com/api/webhooks/1/<b>x</b>",
            &settings(),
            &NoopHooks,
        );
        assert_eq!(url, "https://discord.com/api/webhooks/1/bx/b");
    }

    struct ThreadHooks;

    impl Hooks for ThreadHooks {
        fn filter_context_webhook_url(&self, context: &Context, url: String) -> String {
            if context.as_str() == "cf7" {
                "https://discord.com/api/webhooks/9/forms".to_owned()
            } else {
                url
            }
        }

        fn filter_webhook_url(&self, url: String) -> String {
            format!("{url}?thread_id=77")
        }
    }

    #[test]
    fn filters_run_context_first_then_global() {
        let url = resolve_webhook_url(&Context::new("cf7"), "", &settings(), &ThreadHooks);
        assert_eq!(url, "https://discord.com/api/webhooks/9/forms?thread_id=77");
        let url = resolve_webhook_url(&Context::new("post"), "", &settings(), &ThreadHooks);
        assert_eq!(url, "https://discord.com/api/webhooks/1/default?thread_id=77");
    }
}
