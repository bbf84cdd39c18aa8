const EVERYONE: &str = "@everyone";

/// Prefix `content` with `@everyone ` when `enabled` and the mention is not
/// already present anywhere in the text.
pub fn apply_mention_everyone(content: &str, enabled: bool) -> String {
    if enabled && !content.contains(EVERYONE) {
        format!("{EVERYONE} {content}")
    } else {
        content.to_owned()
    }
}
