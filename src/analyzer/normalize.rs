// src/analyzer/normalize.rs
// =============================================================================
// Word counting.
//
// Markdown syntax that is not prose is stripped before counting. The steps
// run in a fixed order: link/image syntax is removed BEFORE the generic
// symbol pass, otherwise URLs would survive as "words".
//
// Known limitation: a fence with no closing ``` swallows the rest of the
// document, so nothing after an unterminated fence is counted.
// =============================================================================

use regex::Regex;
use std::sync::LazyLock;

static RE_FENCED_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)`{3,}.*?(?:`{3,}|\z)").unwrap());
static RE_INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`]+`").unwrap());
static RE_IMAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[.*?\]\(.*?\)").unwrap());
static RE_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[.*?\]\(.*?\)").unwrap());
static RE_SYMBOLS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[#>*_\[\]()!]").unwrap());

/// Counts prose words in markdown text.
///
/// Code (fenced and inline), images and inline links are dropped entirely;
/// remaining markdown control characters act as separators.
pub fn count_words(text: &str) -> usize {
    strip_markdown(text).split_whitespace().count()
}

// Returns the text with non-prose markdown removed
fn strip_markdown(text: &str) -> String {
    let text = RE_FENCED_CODE.replace_all(text, "");
    let text = RE_INLINE_CODE.replace_all(&text, "");
    let text = RE_IMAGE.replace_all(&text, "");
    let text = RE_LINK.replace_all(&text, "");
    RE_SYMBOLS.replace_all(&text, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n\t  \n"), 0);
    }

    #[test]
    fn test_simple_word_count() {
        assert_eq!(count_words("Hello world"), 2);
        assert_eq!(count_words("Hello world\nThis is markdown"), 5);
    }

    #[test]
    fn test_heading_markers_are_not_words() {
        assert_eq!(count_words("# Title\n## Sub title"), 3);
        assert_eq!(count_words("> quoted *bold* _em_"), 3);
    }

    #[test]
    fn test_code_is_removed() {
        let text = "Before\n```rust\nlet x = 1;\nlet y = 2;\n```\nAfter `inline code` end";
        assert_eq!(count_words(text), 3);
    }

    #[test]
    fn test_links_and_images_are_removed() {
        let text = "See [the docs](https://example.com/docs) and ![a logo](logo.png) here";
        assert_eq!(count_words(text), 3);
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let text = "one two\n```\nthree four five";
        assert_eq!(count_words(text), 2);
    }

    #[test]
    fn test_large_input() {
        let text = format!("# Title\n{}", "word ".repeat(5000));
        assert_eq!(count_words(&text), 5001);
    }
}
