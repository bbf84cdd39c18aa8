use std::sync::LazyLock;

use regex::Regex;

use postcord_core::sanitize::strip_all_tags;

use crate::entities::decode_entities;

/// Opening (or self-closing) shortcode tag: `[name attr="x"]`.
static SHORTCODE_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([a-zA-Z][\w-]*)(?:\s[^\]]*)?\]").expect("valid shortcode regex")
});

/// Any shortcode tag, opening or closing.
static SHORTCODE_ANY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[/?[a-zA-Z][\w-]*(?:\s[^\]]*)?\]").expect("valid shortcode regex")
});

/// Remove shortcodes, enclosed content included.
///
/// An opening tag with a matching `[/name]` later in the text is removed
/// together with everything up to and including the closing tag. Unpaired
/// tags are then dropped on their own.
pub fn strip_shortcodes(input: &str) -> String {
    if !input.contains('[') {
        return input.to_owned();
    }

    let mut text = input.to_owned();
    let mut from = 0;
    while let Some((start, open_end, closing)) = next_opening(&text, from) {
        match text[open_end..].find(&closing) {
            Some(offset) => {
                text.replace_range(start..open_end + offset + closing.len(), "");
                from = start;
            }
            None => from = open_end,
        }
    }

    SHORTCODE_ANY_RE.replace_all(&text, "").into_owned()
}

/// Span of the next opening tag at or after `from`, with its closing tag.
fn next_opening(text: &str, from: usize) -> Option<(usize, usize, String)> {
    let caps = SHORTCODE_OPEN_RE.captures_at(text, from)?;
    let tag = caps.get(0)?;
    Some((tag.start(), tag.end(), format!("[/{}]", &caps[1])))
}

/// Keep the first `max_words` whitespace-separated words of `text`.
///
/// When words were dropped, `more` is appended to the result. Whitespace
/// between kept words collapses to a single space.
pub fn trim_words(text: &str, max_words: usize, more: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > max_words {
        let mut trimmed = words[..max_words].join(" ");
        trimmed.push_str(more);
        trimmed
    } else {
        words.join(" ")
    }
}

/// Derive a plain-text description from rich content.
///
/// Shortcodes and markup are removed, entities decoded, and the result is
/// bounded to `max_words` words with `more` marking a truncation.
pub fn excerpt(content: &str, max_words: usize, more: &str) -> String {
    let text = strip_shortcodes(content);
    let text = strip_all_tags(&text);
    let text = decode_entities(&text);
    trim_words(&text, max_words, more)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_paired_and_single_shortcodes() {
        let input = r#"Intro [gallery ids="1,2"] text [caption id="x"]<img src="a.png"> A caption[/caption] end"#;
        assert_eq!(strip_shortcodes(input), "Intro  text  end");
    }

    #[test]
    fn keeps_plain_brackets() {
        assert_eq!(strip_shortcodes("array[0] and [1]"), "array[0] and [1]");
    }

    #[test]
    fn trims_to_word_count() {
        assert_eq!(trim_words("one two three four", 2, " ..."), "one two ...");
        assert_eq!(trim_words("one  two\nthree", 5, " ..."), "one two three");
    }

    #[test]
    fn excerpt_pipeline() {
        let content = "<p>Hello &amp; <strong>welcome</strong> [embed]https://v.test[/embed]to my blog.</p>\
                       <script>track()</script>";
        assert_eq!(excerpt(content, 55, " ..."), "Hello & welcome to my blog.");
    }

    #[test]
    fn excerpt_truncates_long_content() {
        let content = (1..=60).map(|n| format!("w{n}")).collect::<Vec<_>>().join(" ");
        let out = excerpt(&content, 55, " ...");
        assert!(out.ends_with("w55 ..."));
        assert_eq!(out.split_whitespace().count(), 56);
    }
}
