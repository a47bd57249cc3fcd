//! Whitespace collapsing and boilerplate phrase stripping for extracted text.

use std::sync::LazyLock;

use regex::Regex;

use crate::rules::BoilerplatePatterns;

static BLANK_LINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n+").unwrap());
static HORIZONTAL_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

/// Normalizes raw article text.
///
/// Runs of three or more line breaks (with any whitespace between them)
/// collapse to one blank line, spaces and tabs collapse to a single space,
/// every boilerplate match is deleted, and the result is trimmed.
///
/// # Example
///
/// ```rust
/// use page_zen_core::{BoilerplatePatterns, normalize_text};
///
/// let text = "  Intro\n\n\n\nBody\t\ttext. Follow us on  ";
/// let cleaned = normalize_text(text, &BoilerplatePatterns::default());
/// assert_eq!(cleaned, "Intro\n\nBody text.");
/// ```
pub fn normalize_text(text: &str, patterns: &BoilerplatePatterns) -> String {
    let collapsed = BLANK_LINE_RUNS.replace_all(text, "\n\n");
    let mut content = HORIZONTAL_SPACE.replace_all(&collapsed, " ").into_owned();

    for pattern in patterns.patterns() {
        content = pattern.replace_all(&content, "").into_owned();
    }

    content.trim().to_string()
}
