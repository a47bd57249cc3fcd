//! The cleaned article returned by a full extraction.

use serde::{Deserialize, Serialize};
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::{Date, Month, OffsetDateTime};

use crate::excerpt::excerpt;
use crate::opengraph::SocialMetadata;
use crate::readability::ArticleSummary;

/// The complete result of cleaning one page.
///
/// `length` is the character count of `content`, and `excerpt` is a prefix
/// of `content` (plus `...` when shortened).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedArticle {
    pub title: String,

    /// Normalized plain text of the article body.
    pub content: String,

    /// Markdown rendering of the body, or its HTML when conversion failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,

    /// Source URL as requested.
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub excerpt: String,

    /// Character count of `content`.
    pub length: usize,

    /// RFC 3339 publish time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_graph: Option<SocialMetadata>,
}

impl CleanedArticle {
    /// Assembles the article from the readability summary and the already
    /// normalized text, deriving excerpt and length from `content`.
    pub fn assemble(
        url: &str, summary: &ArticleSummary, content: String, markdown: Option<String>, excerpt_length: usize,
        open_graph: Option<SocialMetadata>,
    ) -> Self {
        let length = content.chars().count();
        let excerpt = excerpt(&content, excerpt_length);
        let published_at = summary.published_time.as_deref().and_then(format_published_at);

        Self {
            title: summary.title.trim().to_string(),
            content,
            markdown,
            url: url.to_string(),
            author: summary.byline.as_ref().map(|b| b.trim().to_string()).filter(|b| !b.is_empty()),
            excerpt,
            length,
            published_at,
            open_graph,
        }
    }

    /// True when there is neither a title nor any content.
    pub fn is_degenerate(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }
}

/// Normalizes a page-declared publish time to RFC 3339.
///
/// Accepts RFC 3339, RFC 2822, and bare `YYYY-MM-DD` dates (taken as midnight
/// UTC). Anything else yields `None`.
///
/// # Example
///
/// ```rust
/// use page_zen_core::article::format_published_at;
///
/// assert_eq!(format_published_at("2024-03-01").as_deref(), Some("2024-03-01T00:00:00Z"));
/// assert_eq!(format_published_at("last Tuesday"), None);
/// ```
pub fn format_published_at(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let parsed = OffsetDateTime::parse(raw, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(raw, &Rfc2822))
        .ok()
        .or_else(|| parse_date_only(raw))?;

    parsed.format(&Rfc3339).ok()
}

fn parse_date_only(raw: &str) -> Option<OffsetDateTime> {
    let mut parts = raw.splitn(3, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u8 = parts.next()?.parse().ok()?;
    let day: u8 = parts.next()?.parse().ok()?;

    let date = Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()?;
    Some(date.midnight().assume_utc())
}
