use serde::{Deserialize, Serialize};

/// A single name/value row of an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    /// Render side-by-side with neighbouring inline fields.
    #[serde(default)]
    pub inline: bool,
}

impl EmbedField {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }

    #[must_use]
    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            inline: true,
            ..Self::new(name, value)
        }
    }
}

/// Rich attachment content as produced by an adapter.
///
/// Every attribute is optional. Missing ones are either defaulted when the
/// embed is assembled for the wire (author, url, timestamp) or omitted from
/// the payload entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedContent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    /// ISO-8601 timestamp.
    pub timestamp: Option<String>,
    /// Thumbnail / featured image URL.
    pub image: Option<String>,
    pub author: Option<String>,
    /// Rows in insertion order.
    pub fields: Vec<EmbedField>,
}

impl EmbedContent {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: EmbedField) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a field.
    pub fn push_field(&mut self, field: EmbedField) {
        self.fields.push(field);
    }

    /// `true` when no attribute carries a non-blank value and there are no
    /// fields. Empty embeds are not sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let blank = |v: &Option<String>| v.as_deref().is_none_or(|s| s.trim().is_empty());
        blank(&self.title)
            && blank(&self.description)
            && blank(&self.url)
            && blank(&self.timestamp)
            && blank(&self.image)
            && blank(&self.author)
            && self.fields.is_empty()
    }
}
