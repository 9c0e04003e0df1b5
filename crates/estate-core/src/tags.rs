//! Tag and keyword normalization
//!
//! Tag inputs accept comma-separated free text, and stored tags may have been
//! through several JSON round-trips, picking up stray `["`, `"]` or `\"`
//! sequences. Each tag is trimmed together with wrapping bracket, quote and
//! backslash characters, escaped quotes are unescaped, and empty results are
//! dropped. Cleaning an already clean list returns it unchanged.

use std::sync::LazyLock;

use regex::Regex;

/// One or more backslashes followed by a quote
static ESCAPED_QUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\\+(["'])"#).expect("valid escaped quote regex"));

fn is_wrapping(c: char) -> bool {
    c.is_whitespace() || matches!(c, '[' | ']' | '"' | '\'' | '\\')
}

/// Clean a single tag; `None` when nothing is left
pub fn clean_tag(raw: &str) -> Option<String> {
    let stripped = raw.trim_matches(is_wrapping);
    let unescaped = ESCAPED_QUOTE.replace_all(stripped, "$1");
    if unescaped.is_empty() {
        None
    } else {
        Some(unescaped.into_owned())
    }
}

/// Clean every tag in a list, dropping empties and keeping order
pub fn clean_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    tags.iter().filter_map(|t| clean_tag(t.as_ref())).collect()
}

/// Split comma-separated input and clean each piece
pub fn parse_tag_input(input: &str) -> Vec<String> {
    input.split(',').filter_map(clean_tag).collect()
}

/// Join tags back into the comma-separated form used by the input field
pub fn format_tags(tags: &[String]) -> String {
    tags.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_artifacts() {
        let tags = parse_tag_input(r#"["Luxury"], 'Modern', "Green\"Home""#);
        assert_eq!(tags, vec!["Luxury", "Modern", "Green\"Home"]);
    }

    #[test]
    fn test_clean_trims_and_drops_empty() {
        let tags = clean_tags(&["  Sea view ", "", "[]", "\"\"", "   "]);
        assert_eq!(tags, vec!["Sea view"]);
    }

    #[test]
    fn test_clean_strips_json_wrapping() {
        assert_eq!(clean_tag(r#"["Gated"]"#).as_deref(), Some("Gated"));
        assert_eq!(clean_tag(r#"\"Pool\""#).as_deref(), Some("Pool"));
        assert_eq!(clean_tag(r#"[\"Gym\"]"#).as_deref(), Some("Gym"));
    }

    #[test]
    fn test_clean_unescapes_nested_escapes() {
        assert_eq!(clean_tag(r#"a\\"b"#).as_deref(), Some("a\"b"));
        assert_eq!(clean_tag(r#"it\'s"#).as_deref(), Some("it's"));
    }

    #[test]
    fn test_clean_is_idempotent() {
        let inputs = [
            r#"["Luxury"]"#,
            r#"'Modern'"#,
            r#""Green\"Home""#,
            r#"\"abc"#,
            r#"abc\""#,
            r#"a\\"b"#,
            "  plain  ",
            "[ spaced ]",
        ];
        let once = clean_tags(&inputs);
        let twice = clean_tags(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_format_tags_round_trip() {
        let tags = vec!["Luxury".to_string(), "Modern".to_string()];
        assert_eq!(parse_tag_input(&format_tags(&tags)), tags);
    }
}
