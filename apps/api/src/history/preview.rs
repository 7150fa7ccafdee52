/// Characters kept before a preview is cut.
pub const PREVIEW_CHARS: usize = 200;
const ELLIPSIS: &str = "...";

/// The first `PREVIEW_CHARS` characters plus "..." when the text is longer;
/// otherwise the text unchanged. Counts characters, not bytes.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(preview("Built scalable systems"), "Built scalable systems");
        assert_eq!(preview(""), "");
    }

    #[test]
    fn test_exactly_limit_unchanged() {
        let text = "a".repeat(PREVIEW_CHARS);
        assert_eq!(preview(&text), text);
    }

    #[test]
    fn test_long_text_truncated_with_ellipsis() {
        let text = "b".repeat(PREVIEW_CHARS + 1);
        let p = preview(&text);
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);
        assert!(p.ends_with("..."));
        assert!(text.starts_with(p.trim_end_matches("...")));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "é".repeat(PREVIEW_CHARS + 50);
        let p = preview(&text);
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);
        assert!(p.starts_with("éé"));
    }
}
