use std::collections::HashSet;

use ammonia::Builder;

/// Strips every tag and attribute from `input`, keeping only its text.
///
/// `<script>` and `<style>` bodies are dropped together with the tags. The
/// remaining text comes back entity-escaped (`&`, `<`, `>`, quotes), so the
/// result can be placed inside an HTML element or attribute without further
/// escaping.
pub fn strip_markup(input: &str) -> String {
    let mut builder = Builder::empty();
    builder.clean_content_tags(["script", "style"].into_iter().collect::<HashSet<_>>());
    let text = builder.clean(input).to_string();
    escape_quotes(&text)
}

/// Like [`strip_markup`], but falls back to `default` when nothing readable
/// is left.
pub fn strip_markup_or(input: Option<&str>, default: &str) -> String {
    let cleaned = input.map(strip_markup).unwrap_or_default();
    if cleaned.trim().is_empty() {
        strip_markup(default)
    } else {
        cleaned
    }
}

fn escape_quotes(text: &str) -> String {
    text.replace('"', "&quot;").replace('\'', "&#39;")
}
