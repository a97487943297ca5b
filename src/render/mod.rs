//! Dashboard rendering
//!
//! Each dashboard is a single self-contained HTML document: embedded CSS,
//! a fully formatted view model embedded as JSON, and a small script that
//! builds the DOM from it and wires the interactive affordances (tabs,
//! search filter, sort). All parsing and formatting happens in Rust before
//! the page is written; the script only binds data to markup.

pub mod analysis;
pub mod media_kit;

use serde::Serialize;

/// Escape text for interpolation into HTML markup.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Serialize a view model for embedding in a `<script>` block. `</` is
/// escaped so content can never terminate the script element early.
pub(crate) fn json_for_script<T: Serialize>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json.replace("</", "<\\/"),
        Err(_) => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"A & B"</b>"#),
            "&lt;b&gt;&quot;A &amp; B&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_json_for_script_escapes_closing_tags() {
        let json = json_for_script(&"</script><script>");
        assert!(!json.contains("</script>"));
        assert!(json.contains("<\\/script>"));
    }
}
