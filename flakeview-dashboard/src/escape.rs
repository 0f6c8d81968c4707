//! Escaping of raw test output for tooltip display.

/// Escape `text` the way a DOM text node is serialized into HTML
///
/// Quotes are left alone, text content never needs them escaped.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Markup of a `<pre>` element holding `output` as its only text node
pub fn pre_tooltip(output: &str) -> String {
    format!("<pre>{}</pre>", escape_text(output))
}
