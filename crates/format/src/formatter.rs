use std::sync::Arc;

use chrono::{DateTime, Utc};

use postcord_core::{ContentKind, EmbedContent, Settings};

use crate::embed::{Embed, build_embed};
use crate::excerpt::excerpt;
use crate::mention::apply_mention_everyone;
use crate::template::{Placeholders, render_template};

/// Settings-aware front end to the formatting functions.
///
/// Holds the configuration explicitly; nothing is looked up globally.
#[derive(Debug, Clone)]
pub struct Formatter {
    settings: Arc<Settings>,
}

impl Formatter {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Render the configured template for `kind`, falling back to the
    /// built-in one, then apply the mention-everyone toggle.
    pub fn content(&self, kind: ContentKind, placeholders: &Placeholders) -> String {
        let rendered = render_template(self.settings.template(kind), placeholders, kind);
        apply_mention_everyone(&rendered, self.settings.features.mention_everyone)
    }

    /// Plain-text description of rich content, bounded by the configured
    /// excerpt length.
    pub fn description(&self, content: &str) -> String {
        let formatting = &self.settings.formatting;
        excerpt(content, formatting.excerpt_length, &formatting.excerpt_more)
    }

    /// Whether adapters should attach embeds at all.
    pub fn embeds_enabled(&self) -> bool {
        !self.settings.features.disable_embed
    }

    /// Wire embed for `content` using the configured site identity.
    pub fn embed(&self, content: &EmbedContent, now: DateTime<Utc>) -> Embed {
        build_embed(content, &self.settings.site, now)
    }
}
