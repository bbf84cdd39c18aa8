use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use postcord_core::ContentKind;

/// `%name%` tokens. Names are lower-case identifiers.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%([a-z][a-z0-9_]*)%").expect("valid placeholder regex"));

/// Placeholder name to value mapping, keyed without the surrounding `%`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders(HashMap<String, String>);

impl Placeholders {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Placeholders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Replace every known `%name%` token in `template` with its value.
///
/// Substitution is a single pass: values are never rescanned, so a value
/// that itself contains `%title%` is inserted literally. Unknown tokens are
/// left in place.
pub fn substitute(template: &str, placeholders: &Placeholders) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| {
            placeholders
                .get(&caps[1])
                .map_or_else(|| caps[0].to_owned(), str::to_owned)
        })
        .into_owned()
}

/// Render a message template for a content kind.
///
/// When the configured template renders to blank text, the built-in template
/// for `kind` is rendered with the same placeholders instead.
pub fn render_template(template: &str, placeholders: &Placeholders, kind: ContentKind) -> String {
    let rendered = substitute(template, placeholders);
    if rendered.trim().is_empty() {
        substitute(kind.default_template(), placeholders)
    } else {
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_placeholders() -> Placeholders {
        Placeholders::new()
            .with("title", "Hello World")
            .with("author", "Jane")
            .with("url", "https://blog.test/hello")
            .with("post_type", "post")
    }

    #[test]
    fn substitutes_known_placeholders() {
        let out = render_template(
            "%title% by %author%: %url%",
            &post_placeholders(),
            ContentKind::Post,
        );
        assert_eq!(out, "Hello World by Jane: https://blog.test/hello");
    }

    #[test]
    fn unknown_tokens_pass_through() {
        let out = render_template(
            "%title% costs %price% (%unknown%) 100%",
            &post_placeholders(),
            ContentKind::Post,
        );
        assert_eq!(out, "Hello World costs %price% (%unknown%) 100%");
    }

    #[test]
    fn repeated_placeholders_all_replaced() {
        let out = substitute("%title% / %title%", &post_placeholders());
        assert_eq!(out, "Hello World / Hello World");
    }

    #[test]
    fn values_are_not_rescanned() {
        let placeholders = Placeholders::new()
            .with("title", "%author%")
            .with("author", "Jane");
        assert_eq!(substitute("%title%", &placeholders), "%author%");
    }

    #[test]
    fn empty_template_falls_back_to_default() {
        let out = render_template("", &post_placeholders(), ContentKind::Post);
        assert_eq!(
            out,
            "Jane just published the post Hello World on their blog: https://blog.test/hello"
        );
    }

    #[test]
    fn blank_template_falls_back_for_each_kind() {
        let product = render_template("   ", &Placeholders::new(), ContentKind::Product);
        assert_eq!(product, "A new product is available in our store. Check it out!");

        let order_placeholders: Placeholders = [
            ("order_number", "1042"),
            ("order_customer", "John Doe"),
            ("order_total", "$25.00"),
        ]
        .into_iter()
        .collect();
        let order = render_template("", &order_placeholders, ContentKind::Order);
        assert_eq!(
            order,
            "Order #1042 by John Doe has been created. The order total is $25.00."
        );
    }

    #[test]
    fn template_rendering_to_empty_value_falls_back() {
        let placeholders = Placeholders::new().with("title", "");
        let out = render_template("%title%", &placeholders, ContentKind::Product);
        assert_eq!(out, ContentKind::Product.default_template());
    }
}
