use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use postcord_core::{EmbedContent, EmbedField, SiteConfig};

/// A rich embed in the chat service's wire format.
///
/// Attributes that carry no value are omitted when serialized, never sent as
/// empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Always `"rich"`.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// ISO 8601 timestamp.
    pub timestamp: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,

    #[serde(default)]
    pub fields: Vec<WireField>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedAuthor {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedImage {
    pub url: String,
}

/// An embed field on the wire. `inline` is only sent when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireField {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<bool>,
}

impl From<&EmbedField> for WireField {
    fn from(field: &EmbedField) -> Self {
        Self {
            name: field.name.clone(),
            value: field.value.clone(),
            inline: field.inline.then_some(true),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_owned)
}

/// Assemble the wire embed for `content`, filling site defaults.
///
/// - `author` falls back to the site name.
/// - `url` falls back to the site root.
/// - `timestamp` falls back to `now`.
/// - the footer carries the site name and icon.
/// - `image` is only present when the content has one.
pub fn build_embed(content: &EmbedContent, site: &SiteConfig, now: DateTime<Utc>) -> Embed {
    let site_name = non_empty(Some(site.name.as_str()));

    let footer = match (site_name.clone(), non_empty(Some(site.icon_url.as_str()))) {
        (None, None) => None,
        (text, icon_url) => Some(EmbedFooter {
            text: text.unwrap_or_default(),
            icon_url,
        }),
    };

    Embed {
        title: non_empty(content.title.as_deref()),
        kind: "rich".to_owned(),
        description: non_empty(content.description.as_deref()),
        url: non_empty(content.url.as_deref()).or_else(|| non_empty(Some(site.url.as_str()))),
        timestamp: non_empty(content.timestamp.as_deref())
            .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Secs, false)),
        footer,
        author: non_empty(content.author.as_deref())
            .or(site_name)
            .map(|name| EmbedAuthor { name }),
        fields: content.fields.iter().map(WireField::from).collect(),
        image: non_empty(content.image.as_deref()).map(|url| EmbedImage { url }),
    }
}
