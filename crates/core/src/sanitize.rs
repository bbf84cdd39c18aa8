//! Input sanitizers for bot identity, credentials, and URLs.
//!
//! Sanitization never fails: malformed input is clamped to a safe value
//! (possibly the empty string) instead of being rejected.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// `<script>` and `<style>` elements, contents included.
static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script[^>]*?>.*?</script\s*>|<style[^>]*?>.*?</style\s*>")
        .expect("valid script/style regex")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"));

static OCTET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[a-fA-F0-9]{2}").expect("valid octet regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n\t ]+").expect("valid whitespace regex"));

/// URL schemes accepted by [`sanitize_url`].
const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Remove markup tags, keeping the text between them.
pub fn strip_tags(input: &str) -> String {
    TAG_RE.replace_all(input, "").into_owned()
}

/// Remove markup tags and the contents of `<script>`/`<style>` elements.
pub fn strip_all_tags(input: &str) -> String {
    let without_scripts = SCRIPT_STYLE_RE.replace_all(input, "");
    strip_tags(&without_scripts)
}

/// Sanitize a free-text field such as the bot display name.
///
/// Strips markup (including script contents), percent-encoded octets and
/// control characters, collapses whitespace runs into single spaces, and
/// trims the result.
pub fn sanitize_text_field(input: &str) -> String {
    let mut text = if input.contains('<') {
        strip_all_tags(input)
    } else {
        input.to_owned()
    };

    text = OCTET_RE.replace_all(&text, "").into_owned();
    text = WHITESPACE_RE.replace_all(&text, " ").into_owned();
    text.retain(|c| !c.is_control());
    text.trim().to_owned()
}

/// Sanitize a key-like value (token, context slug).
///
/// Lower-cases the input and keeps only ASCII alphanumerics, `_` and `-`.
pub fn sanitize_key(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

fn is_url_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || !c.is_ascii()
        || matches!(
            c,
            '-' | '~'
                | '+'
                | '_'
                | '.'
                | '?'
                | '#'
                | '='
                | '!'
                | '&'
                | ';'
                | ','
                | '/'
                | ':'
                | '%'
                | '@'
                | '$'
                | '|'
                | '*'
                | '\''
                | '('
                | ')'
                | '['
                | ']'
        )
}

/// Sanitize a URL for storage.
///
/// Characters that are not valid in a URL (notably `<`, `>`, quotes and
/// whitespace) are removed, leaving the rest of the string in place. The
/// result must parse as an absolute `http`/`https` URL; a missing scheme is
/// completed with `http://`. Anything else yields the empty string.
pub fn sanitize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut cleaned: String = trimmed
        .replace(' ', "%20")
        .chars()
        .filter(|c| is_url_char(*c))
        .collect();

    for encoded_break in ["%0d", "%0a", "%0D", "%0A"] {
        while cleaned.contains(encoded_break) {
            cleaned = cleaned.replace(encoded_break, "");
        }
    }

    if cleaned.is_empty() {
        return String::new();
    }

    let candidate = match Url::parse(&cleaned) {
        Ok(_) => cleaned,
        Err(url::ParseError::RelativeUrlWithoutBase)
            if cleaned.starts_with(|c: char| c.is_ascii_alphanumeric()) =>
        {
            format!("http://{cleaned}")
        }
        Err(_) => return String::new(),
    };

    match Url::parse(&candidate) {
        Ok(parsed) if ALLOWED_SCHEMES.contains(&parsed.scheme()) => candidate,
        _ => String::new(),
    }
}

/// Redact the secret path of a webhook URL for display.
///
/// Keeps scheme and host; everything after the host is replaced with
/// `/[REDACTED]`.
pub fn redact_url(input: &str) -> String {
    match Url::parse(input) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => format!("{}://{host}/[REDACTED]", parsed.scheme()),
            None => "[REDACTED]".to_owned(),
        },
        Err(_) if input.is_empty() => String::new(),
        Err(_) => "[REDACTED]".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_field_plain() {
        assert_eq!(sanitize_text_field("test"), "test");
    }

    #[test]
    fn text_field_strips_script_and_contents() {
        assert_eq!(
            sanitize_text_field("<script>alert();</script>This is a test"),
            "This is a test"
        );
    }

    #[test]
    fn text_field_collapses_whitespace() {
        assert_eq!(
            sanitize_text_field("  <b>Bot</b>\n\tName  "),
            "Bot Name"
        );
    }

    #[test]
    fn text_field_drops_octets_and_controls() {
        assert_eq!(sanitize_text_field("bot%0Aname\u{7}"), "botname");
    }

    #[test]
    fn key_lowercases_and_filters() {
        assert_eq!(sanitize_key("abcdef"), "abcdef");
        assert_eq!(sanitize_key("Not a Token with-dashes"), "notatokenwith-dashes");
        assert_eq!(sanitize_key("snake_case.dot"), "snake_casedot");
    }

    #[test]
    fn url_valid_passthrough() {
        assert_eq!(
            sanitize_url("https://this.site/image.jpg"),
            "https://this.site/image.jpg"
        );
    }

    #[test]
    fn url_strips_markup_characters() {
        assert_eq!(
            sanitize_url("http:/image.com/<script>alert()</script>.jpg"),
            "http:/image.com/scriptalert()/script.jpg"
        );
        assert_eq!(
            sanitize_url("https://test.domain/ab<script>alert()</script>cdef"),
            "https://test.domain/abscriptalert()/scriptcdef"
        );
    }

    #[test]
    fn url_adds_missing_scheme() {
        assert_eq!(sanitize_url("example.com/hook"), "http://example.com/hook");
    }

    #[test]
    fn url_rejects_other_schemes_and_relative() {
        assert_eq!(sanitize_url("javascript:alert(1)"), "");
        assert_eq!(sanitize_url("/relative/path"), "");
        assert_eq!(sanitize_url(""), "");
        assert_eq!(sanitize_url("<>"), "");
    }

    #[test]
    fn url_removes_encoded_line_breaks() {
        assert_eq!(
            sanitize_url("https://a.test/x%0d%0aSet-Cookie"),
            "https://a.test/xSet-Cookie"
        );
    }

    #[test]
    fn redacts_webhook_path() {
        assert_eq!(
            redact_url("https://discord.com/api/webhooks/123/secret"),
            "https://discord.com/[REDACTED]"
        );
        assert_eq!(redact_url(""), "");
    }

    #[test]
    fn strip_tags_keeps_text() {
        assert_eq!(strip_tags("<a href=\"x\">News</a>, <b>Tech</b>"), "News, Tech");
    }
}
