//! Readability adapter over `dom_smoothie`.
//!
//! The scoring itself is delegated; this module only turns its article into
//! an [`ArticleSummary`] and decides what counts as "nothing readable".

use dom_query::Document;
use dom_smoothie::Readability;

use crate::{PageZenError, Result};

/// What the readability pass found in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleSummary {
    pub title: String,
    pub byline: Option<String>,
    /// Body HTML of the main content block.
    pub content_html: String,
    /// Plain text of the main content block, not yet normalized.
    pub text: String,
    /// Publish time exactly as the page declared it.
    pub published_time: Option<String>,
}

/// Runs readability over the (already pruned) document, consuming it.
///
/// `url` is the document location; relative links in the returned body are
/// made absolute against it. A readability error, or a result without any
/// text, is reported as [`PageZenError::NotReadable`].
pub fn summarize(doc: Document, url: Option<&str>) -> Result<ArticleSummary> {
    let mut readability =
        Readability::with_document(doc, url, None).map_err(|e| PageZenError::NotReadable(e.to_string()))?;

    let article = readability
        .parse()
        .map_err(|e| PageZenError::NotReadable(e.to_string()))?;

    let text = article.text_content.to_string();
    if text.trim().is_empty() {
        return Err(PageZenError::NotReadable("article has no text content".to_string()));
    }

    let summary = ArticleSummary {
        title: article.title.trim().to_string(),
        byline: article
            .byline
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty()),
        content_html: article.content.to_string(),
        text,
        published_time: article.published_time.filter(|t| !t.trim().is_empty()),
    };

    tracing::info!(
        title_length = summary.title.chars().count(),
        text_length = summary.text.chars().count(),
        has_byline = summary.byline.is_some(),
        "Readability pass complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article_page() -> String {
        let paragraph = "The committee met on Tuesday to review the results of the survey, \
            which had been collected from more than four hundred households across the region. \
            Members agreed that the findings warranted a second round of interviews before any \
            recommendation could be published, and set a date for the follow-up in the spring.";
        format!(
            r#"<html><head><title>Committee Reviews Survey</title>
            <meta name="author" content="Jane Doe"></head>
            <body><article><h1>Committee Reviews Survey</h1>
            <p>{p}</p><p>{p}</p><p>{p}</p><p><a href="/report">Full report</a></p>
            </article></body></html>"#,
            p = paragraph
        )
    }

    #[test]
    fn test_summarize_article() {
        let doc = Document::from(article_page());
        let summary = summarize(doc, Some("https://site.com/news/survey")).unwrap();

        assert!(summary.title.contains("Committee"));
        assert!(summary.text.contains("four hundred households"));
        assert!(summary.content_html.contains("<p"));
    }

    #[test]
    fn test_summarize_absolutizes_links() {
        let doc = Document::from(article_page());
        let summary = summarize(doc, Some("https://site.com/news/survey")).unwrap();

        assert!(summary.content_html.contains("https://site.com/report"));
    }

    #[test]
    fn test_summarize_sees_in_place_edits() {
        let doc = Document::from(article_page());
        doc.select("a[href='/report']").remove();

        let summary = summarize(doc, Some("https://site.com/news/survey")).unwrap();

        assert!(!summary.content_html.contains("/report"));
        assert!(!summary.text.contains("Full report"));
    }

    #[test]
    fn test_summarize_empty_document_fails() {
        let doc = Document::from("<html><head></head><body></body></html>");
        let result = summarize(doc, None);

        assert!(matches!(result, Err(PageZenError::NotReadable(_))));
    }
}
