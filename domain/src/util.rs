//! Shared utility functions.

/// Escape text for inclusion in an HTML-formatted chat message.
///
/// Chat HTML only recognises `&`, `<` and `>` as markup.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_markup() {
        assert_eq!(escape_html("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    }

    #[test]
    fn escape_leaves_plain_text() {
        assert_eq!(escape_html("سلام, world"), "سلام, world");
    }
}
