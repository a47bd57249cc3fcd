//! Open Graph, Twitter Card and plain meta tag extraction.
//!
//! Reads the pristine document, so it has to run before pruning removes
//! anything from `<head>`.

use dom_query::Document;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::resolve::resolve_url;

/// Social-sharing metadata for one page.
///
/// Empty strings mean "not found" and are left out of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialMetadata {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub content_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub site_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub locale: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub twitter_card: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub twitter_site: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub twitter_creator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub twitter_title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub twitter_description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub twitter_image: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub author: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub published_at: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub modified_at: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub section: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl SocialMetadata {
    /// Assigns one `og:*` / `article:*` property. Unknown keys are ignored.
    fn apply_property(&mut self, property: &str, content: String) {
        match property {
            "og:title" => self.title = content,
            "og:description" => self.description = content,
            "og:image" => self.image = content,
            "og:url" => self.url = content,
            "og:type" => self.content_type = content,
            "og:site_name" => self.site_name = content,
            "og:locale" => self.locale = content,
            "article:author" => self.author = content,
            "article:published_time" => self.published_at = content,
            "article:modified_time" => self.modified_at = content,
            "article:section" => self.section = content,
            "article:tag" => self.tags.push(content),
            _ => {}
        }
    }

    /// Assigns one `twitter:*` name. Unknown keys are ignored.
    fn apply_twitter(&mut self, name: &str, content: String) {
        match name {
            "twitter:card" => self.twitter_card = content,
            "twitter:site" => self.twitter_site = content,
            "twitter:creator" => self.twitter_creator = content,
            "twitter:title" => self.twitter_title = content,
            "twitter:description" => self.twitter_description = content,
            "twitter:image" => self.twitter_image = content,
            _ => {}
        }
    }
}

/// Builds a [`SocialMetadata`] record from `doc`.
///
/// Field precedence, first non-empty wins:
/// 1. Open Graph / `article:` property tags
/// 2. Twitter Card tags (title, description and image only)
/// 3. `<title>`, `meta[name=description]` and `meta[name=author]`
///
/// The canonical URL falls back to `request_url`. URL-valued fields are
/// made absolute against `base`.
///
/// # Example
///
/// ```rust
/// use dom_query::Document;
/// use page_zen_core::extract_social_metadata;
/// use url::Url;
///
/// let doc = Document::from("<html><head><title>Hello</title></head><body></body></html>");
/// let base = Url::parse("https://site.com/post").unwrap();
/// let meta = extract_social_metadata(&doc, "https://site.com/post", &base);
///
/// assert_eq!(meta.title, "Hello");
/// assert_eq!(meta.url, "https://site.com/post");
/// ```
pub fn extract_social_metadata(doc: &Document, request_url: &str, base: &Url) -> SocialMetadata {
    let mut meta = SocialMetadata::default();

    for tag in doc.select("meta[property]").iter() {
        let Some(property) = tag.attr("property") else {
            continue;
        };
        let property = property.trim().to_lowercase();
        if !(property.starts_with("og:") || property.starts_with("article:")) {
            continue;
        }

        let content = tag.attr("content").map(|c| c.to_string()).unwrap_or_default();
        if content.is_empty() {
            continue;
        }

        meta.apply_property(&property, content);
    }

    for tag in doc.select("meta[name]").iter() {
        let Some(name) = tag.attr("name") else {
            continue;
        };
        let name = name.trim().to_lowercase();
        if !name.starts_with("twitter:") {
            continue;
        }

        let content = tag.attr("content").map(|c| c.to_string()).unwrap_or_default();
        if content.is_empty() {
            continue;
        }

        meta.apply_twitter(&name, content);
    }

    apply_fallbacks(doc, &mut meta);

    if meta.url.is_empty() {
        meta.url = request_url.to_string();
    }

    meta.url = resolve_url(&meta.url, base);
    meta.image = resolve_url(&meta.image, base);
    meta.twitter_image = resolve_url(&meta.twitter_image, base);

    tracing::debug!(
        title = %meta.title,
        url = %meta.url,
        has_image = !meta.image.is_empty(),
        tags = meta.tags.len(),
        "Extracted social metadata"
    );

    meta
}

fn apply_fallbacks(doc: &Document, meta: &mut SocialMetadata) {
    if meta.title.is_empty() {
        meta.title = if !meta.twitter_title.is_empty() {
            meta.twitter_title.clone()
        } else {
            doc.select("title").first().text().trim().to_string()
        };
    }

    if meta.description.is_empty() {
        meta.description = if !meta.twitter_description.is_empty() {
            meta.twitter_description.clone()
        } else {
            meta_name_content(doc, "description")
        };
    }

    if meta.image.is_empty() && !meta.twitter_image.is_empty() {
        meta.image = meta.twitter_image.clone();
    }

    if meta.author.is_empty() {
        meta.author = meta_name_content(doc, "author");
    }
}

/// Trimmed `content` of the first `meta[name=...]`, empty when absent.
fn meta_name_content(doc: &Document, name: &str) -> String {
    doc.select(&format!("meta[name=\"{}\"]", name))
        .first()
        .attr("content")
        .map(|c| c.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::is_absolute_url;

    const REQUEST_URL: &str = "https://site.com/news/story?ref=feed";

    fn base() -> Url {
        Url::parse("https://site.com/news/story").unwrap()
    }

    fn extract(html: &str) -> SocialMetadata {
        extract_social_metadata(&Document::from(html), REQUEST_URL, &base())
    }

    #[test]
    fn test_open_graph_tags() {
        let meta = extract(
            r#"<html><head>
                <meta property="og:title" content="OG Title">
                <meta property="og:description" content="OG description">
                <meta property="og:image" content="/img/cover.jpg">
                <meta property="og:url" content="https://site.com/news/story">
                <meta property="og:type" content="article">
                <meta property="og:site_name" content="Site">
                <meta property="og:locale" content="en_US">
                <title>Document Title</title>
            </head><body></body></html>"#,
        );

        assert_eq!(meta.title, "OG Title");
        assert_eq!(meta.description, "OG description");
        assert_eq!(meta.image, "https://site.com/img/cover.jpg");
        assert_eq!(meta.url, "https://site.com/news/story");
        assert_eq!(meta.content_type, "article");
        assert_eq!(meta.site_name, "Site");
        assert_eq!(meta.locale, "en_US");
    }

    #[test]
    fn test_article_properties_and_tags() {
        let meta = extract(
            r#"<html><head>
                <meta property="article:author" content="Jane Doe">
                <meta property="article:published_time" content="2024-03-01T10:00:00Z">
                <meta property="article:modified_time" content="2024-03-02T10:00:00Z">
                <meta property="article:section" content="Science">
                <meta property="article:tag" content="space">
                <meta property="article:tag" content="">
                <meta property="article:tag" content="rockets">
            </head><body></body></html>"#,
        );

        assert_eq!(meta.author, "Jane Doe");
        assert_eq!(meta.published_at, "2024-03-01T10:00:00Z");
        assert_eq!(meta.modified_at, "2024-03-02T10:00:00Z");
        assert_eq!(meta.section, "Science");
        assert_eq!(meta.tags, vec!["space", "rockets"]);
    }

    #[test]
    fn test_twitter_card_tags() {
        let meta = extract(
            r#"<html><head>
                <meta name="twitter:card" content="summary_large_image">
                <meta name="twitter:site" content="@site">
                <meta name="twitter:creator" content="@jane">
                <meta name="twitter:title" content="Tweet Title">
                <meta name="twitter:description" content="Tweet description">
                <meta name="twitter:image" content="//cdn.site.com/t.jpg">
            </head><body></body></html>"#,
        );

        assert_eq!(meta.twitter_card, "summary_large_image");
        assert_eq!(meta.twitter_site, "@site");
        assert_eq!(meta.twitter_creator, "@jane");
        assert_eq!(meta.twitter_image, "https://cdn.site.com/t.jpg");
        assert_eq!(meta.title, "Tweet Title");
        assert_eq!(meta.description, "Tweet description");
        assert_eq!(meta.image, "https://cdn.site.com/t.jpg");
    }

    #[test]
    fn test_title_element_fallback() {
        let meta = extract("<html><head><title>  Hello </title></head><body></body></html>");
        assert_eq!(meta.title, "Hello");
    }

    #[test]
    fn test_standard_meta_fallbacks() {
        let meta = extract(
            r#"<html><head>
                <meta name="description" content=" Plain description ">
                <meta name="author" content=" John Roe ">
            </head><body></body></html>"#,
        );

        assert_eq!(meta.description, "Plain description");
        assert_eq!(meta.author, "John Roe");
    }

    #[test]
    fn test_open_graph_wins_over_fallbacks() {
        let meta = extract(
            r#"<html><head>
                <meta name="twitter:title" content="Tweet Title">
                <meta property="og:title" content="OG Title">
                <meta name="description" content="Plain">
                <meta property="og:description" content="OG">
                <title>Doc</title>
            </head><body></body></html>"#,
        );

        assert_eq!(meta.title, "OG Title");
        assert_eq!(meta.twitter_title, "Tweet Title");
        assert_eq!(meta.description, "OG");
    }

    #[test]
    fn test_empty_content_is_skipped() {
        let meta = extract(
            r#"<html><head>
                <meta property="og:title" content="">
                <title>Fallback</title>
            </head><body></body></html>"#,
        );

        assert_eq!(meta.title, "Fallback");
    }

    #[test]
    fn test_canonical_url_falls_back_to_request_url() {
        let meta = extract("<html><head></head><body><p>No tags</p></body></html>");

        assert_eq!(meta.url, REQUEST_URL);
        assert!(meta.title.is_empty());
        assert!(meta.image.is_empty());
        assert!(meta.tags.is_empty());
    }

    #[test]
    fn test_url_fields_are_absolute() {
        let meta = extract(
            r#"<html><head>
                <meta property="og:url" content="/news/story">
                <meta property="og:image" content="images/a.png">
                <meta name="twitter:image" content="/t.png">
            </head><body></body></html>"#,
        );

        for value in [&meta.url, &meta.image, &meta.twitter_image] {
            assert!(is_absolute_url(value), "{} should be absolute", value);
        }
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let meta = extract(r#"<html><head><meta property="og:type" content="website"></head></html>"#);
        let json = serde_json::to_value(&meta).unwrap();

        assert_eq!(json["type"], "website");
        assert_eq!(json["url"], REQUEST_URL);
        assert!(json.get("title").is_none());
        assert!(json.get("tags").is_none());
    }
}
