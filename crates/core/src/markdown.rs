//! Markdown rendering with an HTML fallback.
//!
//! [`MarkdownRenderer::render`] always hands back something displayable:
//! the converter's Markdown when it succeeds, the input HTML otherwise.
//! Conversion problems only show up in the logs.

use std::error::Error;
use std::fmt;

/// Error type returned by converters.
pub type ConvertError = Box<dyn Error + Send + Sync>;

/// HTML to Markdown conversion capability.
pub trait HtmlToMarkdown: Send + Sync {
    fn convert(&self, html: &str) -> std::result::Result<String, ConvertError>;
}

/// Converter backed by the `htmd` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmdConverter;

#[cfg(feature = "markdown")]
impl HtmlToMarkdown for HtmdConverter {
    fn convert(&self, html: &str) -> std::result::Result<String, ConvertError> {
        htmd::convert(html).map_err(ConvertError::from)
    }
}

/// Plain text fallback when the markdown feature is disabled
#[cfg(not(feature = "markdown"))]
impl HtmlToMarkdown for HtmdConverter {
    fn convert(&self, html: &str) -> std::result::Result<String, ConvertError> {
        let doc = dom_query::Document::from(html);
        Ok(doc.select("body").text().trim().to_string())
    }
}

/// Renders article bodies, never failing.
pub struct MarkdownRenderer {
    converter: Box<dyn HtmlToMarkdown>,
}

impl MarkdownRenderer {
    pub fn new(converter: Box<dyn HtmlToMarkdown>) -> Self {
        Self { converter }
    }

    /// Converts `html`, falling back to `html` itself.
    ///
    /// The fallback applies when the converter errors, and when it returns
    /// nothing for non-blank input.
    pub fn render(&self, html: &str) -> String {
        match self.converter.convert(html) {
            Ok(markdown) if !markdown.trim().is_empty() || html.trim().is_empty() => markdown,
            Ok(_) => {
                tracing::warn!(html_length = html.len(), "Markdown conversion produced no output, using HTML");
                html.to_string()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to convert to markdown, using HTML");
                html.to_string()
            }
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(Box::new(HtmdConverter))
    }
}

impl fmt::Debug for MarkdownRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkdownRenderer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingConverter;

    impl HtmlToMarkdown for FailingConverter {
        fn convert(&self, _html: &str) -> std::result::Result<String, ConvertError> {
            Err("converter exploded".into())
        }
    }

    struct EmptyConverter;

    impl HtmlToMarkdown for EmptyConverter {
        fn convert(&self, _html: &str) -> std::result::Result<String, ConvertError> {
            Ok(String::new())
        }
    }

    #[test]
    fn test_failure_falls_back_to_html() {
        let renderer = MarkdownRenderer::new(Box::new(FailingConverter));
        let html = "<p>Body</p>";
        assert_eq!(renderer.render(html), html);
    }

    #[test]
    fn test_empty_output_falls_back_to_html() {
        let renderer = MarkdownRenderer::new(Box::new(EmptyConverter));
        let html = "<div><p>Body</p></div>";
        assert_eq!(renderer.render(html), html);
    }

    #[test]
    fn test_empty_input_stays_empty() {
        let renderer = MarkdownRenderer::new(Box::new(EmptyConverter));
        assert_eq!(renderer.render(""), "");
    }

    #[cfg(feature = "markdown")]
    #[test]
    fn test_htmd_conversion() {
        let renderer = MarkdownRenderer::default();
        let markdown = renderer.render("<h1>Title</h1><p>Some <strong>bold</strong> text.</p>");

        assert!(markdown.contains("# Title"));
        assert!(markdown.contains("**bold**"));
        assert!(!markdown.contains("<p>"));
    }
}
