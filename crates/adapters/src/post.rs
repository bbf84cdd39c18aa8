use postcord_core::sanitize::strip_tags;
use postcord_core::{ContentKind, Context, EmbedContent, EmbedField, ItemId};
use postcord_format::{Placeholders, decode_entities};

use crate::adapter::{Adapter, Decision, PrepareContext, SkipReason};
use crate::capability::Integration;
use crate::event::{Event, Post};

/// Blog post publishing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostAdapter;

impl PostAdapter {
    fn placeholders(post: &Post) -> Placeholders {
        Placeholders::new()
            .with("title", post.title.as_str())
            .with("author", post.author.as_str())
            .with("url", post.url.as_str())
            .with("post_type", post.post_type.as_str())
    }

    fn embed(post: &Post, cx: &PrepareContext<'_>) -> EmbedContent {
        let mut embed = EmbedContent::new()
            .with_title(decode_entities(&post.title))
            .with_description(cx.formatter.description(&post.content))
            .with_url(post.url.as_str())
            .with_timestamp(post.date.to_rfc3339())
            .with_author(post.author.as_str());
        if let Some(thumbnail) = &post.thumbnail {
            embed = embed.with_image(thumbnail.as_str());
        }
        if let Some(value) = join_terms(&post.categories) {
            embed.push_field(EmbedField::new("Categories", value));
        }
        if let Some(value) = join_terms(&post.tags) {
            embed.push_field(EmbedField::new("Tags", value));
        }
        embed
    }
}

/// Comma-joined, markup-free term list, or `None` when there are no terms.
pub(crate) fn join_terms(terms: &[String]) -> Option<String> {
    let names: Vec<String> = terms
        .iter()
        .map(|term| strip_tags(term).trim().to_owned())
        .filter(|term| !term.is_empty())
        .collect();
    (!names.is_empty()).then(|| names.join(", "))
}

impl Adapter for PostAdapter {
    fn integration(&self) -> Integration {
        Integration::Posts
    }

    fn context(&self) -> Context {
        ContentKind::Post.context()
    }

    fn prepare(&self, event: &Event, cx: &PrepareContext<'_>) -> Decision {
        let Event::PostPublished(post) = event else {
            return Decision::Skip(SkipReason::NoAdapter(event.name()));
        };
        let context = self.context();
        let item = ItemId::new(post.id);

        if let Err(reason) = cx.check_new(&context, item, post.date, post.is_revision) {
            return Decision::Skip(reason);
        }

        let content = cx
            .formatter
            .content(ContentKind::Post, &Self::placeholders(post));
        let embed = if cx.formatter.embeds_enabled() {
            Self::embed(post, cx)
        } else {
            EmbedContent::new()
        };

        cx.notify(context, content, embed, item)
    }
}
