//! Named extension points around message preparation and delivery.
//!
//! Host environments implement [`Hooks`] to observe or rewrite what is sent.
//! Every method has a pass-through default, so implementors override only
//! the points they care about.

use crate::embed::EmbedContent;
use crate::types::{Context, ItemId};

/// Outcome of a single delivery attempt, as seen by [`Hooks::after_send`].
#[derive(Debug, Clone, Copy)]
pub struct SendReport<'a> {
    /// Resolved webhook URL the request was sent to.
    pub url: &'a str,
    /// HTTP status, when a response was received.
    pub status: Option<u16>,
    /// Failure reason, when the attempt failed.
    pub error: Option<&'a str>,
}

impl SendReport<'_> {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Extension points consumed by adapters and the dispatcher.
pub trait Hooks: Send + Sync {
    /// Rewrite the webhook URL chosen for a specific context. Runs first.
    fn filter_context_webhook_url(&self, _context: &Context, url: String) -> String {
        url
    }

    /// Rewrite the webhook URL for every context. Runs after the
    /// context-specific filter.
    fn filter_webhook_url(&self, url: String) -> String {
        url
    }

    /// Override an adapter's "is this item new" decision.
    fn filter_is_new(&self, _context: &Context, _item: ItemId, is_new: bool) -> bool {
        is_new
    }

    /// Rewrite the message text an adapter prepared.
    fn filter_content(&self, _context: &Context, content: String) -> String {
        content
    }

    /// Rewrite the embed an adapter prepared.
    fn filter_embed(&self, _context: &Context, embed: EmbedContent) -> EmbedContent {
        embed
    }

    /// Called before the wire payload is built.
    fn before_payload(&self, _context: &Context, _content: &str, _embed: &EmbedContent) {}

    /// Mutate the serialized wire payload.
    fn filter_payload(&self, _context: &Context, _payload: &mut serde_json::Value) {}

    /// Called right before the request leaves.
    fn before_send(&self, _context: &Context, _url: &str, _payload: &serde_json::Value) {}

    /// Called once the attempt completed, successfully or not.
    fn after_send(&self, _context: &Context, _report: &SendReport<'_>) {}
}

/// Hooks that change nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl Hooks for NoopHooks {}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct Recording {
        seen: Mutex<Vec<String>>,
    }

    impl Hooks for Recording {
        fn filter_webhook_url(&self, url: String) -> String {
            format!("{url}?thread_id=9")
        }

        fn after_send(&self, context: &Context, report: &SendReport<'_>) {
            self.seen
                .lock()
                .unwrap()
                .push(format!("{context}:{}", report.succeeded()));
        }
    }

    #[test]
    fn noop_passes_everything_through() {
        let hooks = NoopHooks;
        let ctx = Context::new("post");
        assert_eq!(
            hooks.filter_context_webhook_url(&ctx, "https://a.test".into()),
            "https://a.test"
        );
        assert_eq!(hooks.filter_webhook_url("https://a.test".into()), "https://a.test");
        assert!(hooks.filter_is_new(&ctx, ItemId::new(1), true));
        assert_eq!(hooks.filter_content(&ctx, "hi".into()), "hi");
        let embed = EmbedContent::new().with_title("t");
        assert_eq!(hooks.filter_embed(&ctx, embed.clone()), embed);
    }

    #[test]
    fn overridden_points_apply() {
        let hooks = Recording {
            seen: Mutex::new(Vec::new()),
        };
        assert_eq!(
            hooks.filter_webhook_url("https://a.test/hook".into()),
            "https://a.test/hook?thread_id=9"
        );

        let report = SendReport {
            url: "https://a.test/hook",
            status: None,
            error: Some("connection refused"),
        };
        hooks.after_send(&Context::new("order"), &report);
        assert_eq!(*hooks.seen.lock().unwrap(), ["order:false"]);
    }
}
