//! Word-boundary-aware excerpts.

/// Default excerpt length for articles, in characters.
pub const DEFAULT_EXCERPT_LENGTH: usize = 200;

const ELLIPSIS: &str = "...";

/// How far back from the cut point a space may sit and still be used.
const WORD_BOUNDARY_WINDOW: usize = 50;

/// Builds an excerpt of at most `max_length` characters plus `...`.
///
/// Content that already fits is returned unchanged. Otherwise the first
/// `max_length` characters are kept, shortened to the last space when that
/// space sits no earlier than fifty characters before the cut.
///
/// # Example
///
/// ```rust
/// use page_zen_core::excerpt;
///
/// assert_eq!(excerpt("short", 200), "short");
/// assert_eq!(excerpt("alpha beta gamma", 12), "alpha beta...");
/// ```
pub fn excerpt(content: &str, max_length: usize) -> String {
    if content.chars().count() <= max_length {
        return content.to_string();
    }

    let cut = content.char_indices().nth(max_length).map_or(content.len(), |(i, _)| i);
    let mut prefix = &content[..cut];

    if let Some(last_space) = prefix.rfind(' ') {
        let space_char_index = prefix[..last_space].chars().count();
        if space_char_index > 0 && space_char_index >= max_length.saturating_sub(WORD_BOUNDARY_WINDOW) {
            prefix = &prefix[..last_space];
        }
    }

    format!("{}{}", prefix, ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_content_unchanged() {
        assert_eq!(excerpt("Hello world", 200), "Hello world");
        assert_eq!(excerpt("", 200), "");
    }

    #[test]
    fn test_exact_length_unchanged() {
        let content = "a".repeat(200);
        assert_eq!(excerpt(&content, 200), content);
    }

    #[test]
    fn test_repeated_words_cut_at_space() {
        let content = "word ".repeat(60);
        let result = excerpt(&content, 200);

        assert!(result.ends_with("..."));
        assert!(result.chars().count() <= 204);
        assert_eq!(result, format!("{}...", &content[..199]));
    }

    #[test]
    fn test_no_space_near_cut_keeps_hard_cut() {
        let content = format!("intro {}", "x".repeat(300));
        let result = excerpt(&content, 200);

        assert_eq!(result.chars().count(), 203);
        assert!(result.starts_with("intro xxx"));
    }

    #[test]
    fn test_space_exactly_at_window_edge_is_used() {
        let content = format!("{} {}", "a".repeat(10), "b".repeat(100));
        assert_eq!(excerpt(&content, 60), format!("{}...", "a".repeat(10)));
    }

    #[test]
    fn test_space_before_window_edge_is_ignored() {
        let content = format!("{} {}", "a".repeat(9), "b".repeat(100));
        let expected: String = content.chars().take(60).collect();
        assert_eq!(excerpt(&content, 60), format!("{}...", expected));
    }

    #[test]
    fn test_multibyte_content() {
        let content = "héllo wörld ".repeat(30);
        let result = excerpt(&content, 100);

        let body = result.strip_suffix("...").unwrap();
        assert!(content.starts_with(body));
        assert!(body.chars().count() <= 100);
    }

    #[test]
    fn test_excerpt_is_prefix_of_content() {
        let content = "The quick brown fox jumps over the lazy dog. ".repeat(10);
        for max in [10, 57, 120, 200] {
            let result = excerpt(&content, max);
            let body = result.strip_suffix("...").unwrap();
            assert!(content.starts_with(body));
            assert!(result.chars().count() <= max + 3);
        }
    }
}
