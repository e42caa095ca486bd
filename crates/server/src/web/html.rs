/// Escapes text for use inside HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }

    result
}

/// Escapes text for a single-quoted JavaScript string literal
pub fn js_string(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\'' => result.push_str("\\'"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\u{2028}' => result.push_str("\\u2028"),
            '\u{2029}' => result.push_str("\\u2029"),
            _ => result.push(c),
        }
    }

    result
}

#[cfg(test)]
mod test {
    use super::{escape, js_string};

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("<b>R&D</b>"), "&lt;b&gt;R&amp;D&lt;/b&gt;");
        assert_eq!(escape(r#"O'Brien "Jr""#), "O&#39;Brien &quot;Jr&quot;");
    }

    #[test]
    fn test_js_string() {
        assert_eq!(js_string("plain"), "plain");
        assert_eq!(js_string("O'Brien"), r"O\'Brien");
        assert_eq!(js_string(r"C:\new"), r"C:\\new");
        assert_eq!(js_string("two\nlines\r"), r"two\nlines\r");
    }
}
