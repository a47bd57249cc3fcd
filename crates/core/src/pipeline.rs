//! The extraction pipeline.
//!
//! [`Extractor`] owns everything an extraction needs that outlives a single
//! call: the HTTP client, the rule tables, and the Markdown renderer. Each
//! call parses its own document, runs the stages over it in place, and drops
//! it before returning. Stage order matters: metadata is read from the
//! pristine page before pruning touches `<head>`.
//!
//! # Example
//!
//! ```rust,no_run
//! use page_zen_core::{Extractor, ExtractorConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExtractorConfig::builder().timeout(10).debug_html_path(None).build();
//! let extractor = Extractor::with_config(config)?;
//!
//! let article = extractor.extract_article("https://example.com/post").await?;
//! println!("{} ({} chars)", article.title, article.length);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use dom_query::Document;
use reqwest::Client;
use url::Url;

use crate::article::CleanedArticle;
use crate::debug::{DEFAULT_DEBUG_HTML_PATH, spawn_debug_write};
use crate::excerpt::DEFAULT_EXCERPT_LENGTH;
use crate::fetch::{FetchConfig, build_client, fetch_page, parse_page_url};
use crate::images::rewrite_images;
use crate::markdown::MarkdownRenderer;
use crate::normalize::normalize_text;
use crate::opengraph::{SocialMetadata, extract_social_metadata};
use crate::prune::prune;
use crate::readability::summarize;
use crate::rules::{BoilerplatePatterns, RemovalRuleSet};
use crate::Result;

/// Configuration for an [`Extractor`].
///
/// # Example
///
/// ```rust
/// use page_zen_core::ExtractorConfig;
///
/// let config = ExtractorConfig::builder()
///     .timeout(15)
///     .user_agent("my-reader/0.1")
///     .excerpt_length(120)
///     .build();
/// assert_eq!(config.fetch.timeout, 15);
/// ```
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Outbound fetch settings (default: 30 s timeout).
    pub fetch: FetchConfig,

    /// Where the cleaned document is dumped after a successful extraction
    /// (default: `tmp/article.html`). `None` disables the dump.
    pub debug_html_path: Option<PathBuf>,

    /// Maximum excerpt length in characters (default: 200).
    pub excerpt_length: usize,

    pub removal_rules: Arc<RemovalRuleSet>,
    pub boilerplate: Arc<BoilerplatePatterns>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            debug_html_path: Some(PathBuf::from(DEFAULT_DEBUG_HTML_PATH)),
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
            removal_rules: Arc::new(RemovalRuleSet::default()),
            boilerplate: Arc::new(BoilerplatePatterns::default()),
        }
    }
}

impl ExtractorConfig {
    /// Creates a new builder for ExtractorConfig.
    pub fn builder() -> ExtractorConfigBuilder {
        ExtractorConfigBuilder::new()
    }
}

/// Builder for ExtractorConfig.
pub struct ExtractorConfigBuilder {
    config: ExtractorConfig,
}

impl ExtractorConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ExtractorConfig::default() }
    }

    /// Sets the fetch timeout in seconds.
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.config.fetch.timeout = seconds;
        self
    }

    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Sets the debug artifact path; `None` turns the dump off.
    pub fn debug_html_path(mut self, path: Option<PathBuf>) -> Self {
        self.config.debug_html_path = path;
        self
    }

    pub fn excerpt_length(mut self, value: usize) -> Self {
        self.config.excerpt_length = value;
        self
    }

    pub fn removal_rules(mut self, rules: RemovalRuleSet) -> Self {
        self.config.removal_rules = Arc::new(rules);
        self
    }

    pub fn boilerplate_patterns(mut self, patterns: BoilerplatePatterns) -> Self {
        self.config.boilerplate = Arc::new(patterns);
        self
    }

    /// Builds the config.
    pub fn build(self) -> ExtractorConfig {
        self.config
    }
}

impl Default for ExtractorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Main entry point for article and metadata extraction.
///
/// Cheap to share behind an `Arc`; calls do not coordinate with each other.
#[derive(Debug)]
pub struct Extractor {
    client: Client,
    config: ExtractorConfig,
    markdown: MarkdownRenderer,
}

impl Extractor {
    /// Creates an extractor with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(ExtractorConfig::default())
    }

    pub fn with_config(config: ExtractorConfig) -> Result<Self> {
        let client = build_client(&config.fetch)?;
        Ok(Self { client, config, markdown: MarkdownRenderer::default() })
    }

    /// Replaces the Markdown renderer.
    pub fn with_markdown_renderer(mut self, renderer: MarkdownRenderer) -> Self {
        self.markdown = renderer;
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Fetches `url` and runs the full cleaning pipeline over it.
    ///
    /// # Errors
    ///
    /// Fetch failures ([`HttpError`](crate::PageZenError::HttpError),
    /// [`Timeout`](crate::PageZenError::Timeout),
    /// [`InvalidUrl`](crate::PageZenError::InvalidUrl)), undecodable bodies
    /// ([`HtmlParseError`](crate::PageZenError::HtmlParseError)), and pages
    /// without article content ([`NotReadable`](crate::PageZenError::NotReadable)).
    pub async fn extract_article(&self, url: &str) -> Result<CleanedArticle> {
        tracing::info!(url = %url, "Starting article extraction");

        let page = fetch_page(&self.client, url, &self.config.fetch).await?;
        self.clean_html(&page.body, url, &page.final_url)
    }

    /// Fetches `url` and reads only its social metadata.
    pub async fn extract_metadata(&self, url: &str) -> Result<SocialMetadata> {
        tracing::info!(url = %url, "Starting to fetch Open Graph data");

        let page = fetch_page(&self.client, url, &self.config.fetch).await?;
        let metadata = self.metadata_from_html(&page.body, url, &page.final_url);

        tracing::info!(url = %url, title = %metadata.title, "Successfully extracted Open Graph data");
        Ok(metadata)
    }

    /// Runs the cleaning pipeline over HTML that is already in hand.
    ///
    /// `request_url` ends up in the article and as the canonical URL fallback;
    /// `base` anchors relative references.
    pub fn clean_html(&self, html: &str, request_url: &str, base: &Url) -> Result<CleanedArticle> {
        let doc = Document::from(html);

        let open_graph = extract_social_metadata(&doc, request_url, base);
        prune(&doc, &self.config.removal_rules);
        rewrite_images(&doc, base);

        let cleaned_html = self.config.debug_html_path.as_ref().map(|_| doc.html().to_string());

        tracing::info!("Converting document to readability format");
        let summary = summarize(doc, Some(base.as_str())).inspect_err(|e| {
            tracing::error!(url = %request_url, error = %e, "Failed to convert document to readability format");
        })?;

        let content = normalize_text(&summary.text, &self.config.boilerplate);
        let markdown = self.markdown.render(&summary.content_html);

        let article = CleanedArticle::assemble(
            request_url,
            &summary,
            content,
            Some(markdown),
            self.config.excerpt_length,
            Some(open_graph),
        );

        tracing::info!(
            url = %request_url,
            title_length = article.title.chars().count(),
            content_length = article.length,
            markdown_length = article.markdown.as_ref().map_or(0, |m| m.len()),
            "Successfully processed article"
        );

        if let (Some(path), Some(html)) = (&self.config.debug_html_path, cleaned_html) {
            spawn_debug_write(path.clone(), html);
        }

        Ok(article)
    }

    /// Reads social metadata from HTML that is already in hand.
    pub fn metadata_from_html(&self, html: &str, request_url: &str, base: &Url) -> SocialMetadata {
        let doc = Document::from(html);
        extract_social_metadata(&doc, request_url, base)
    }
}

/// Fetches and cleans `url` with default settings.
pub async fn extract_article(url: &str) -> Result<CleanedArticle> {
    Extractor::new()?.extract_article(url).await
}

/// Fetches `url` and reads its social metadata with default settings.
pub async fn extract_metadata(url: &str) -> Result<SocialMetadata> {
    Extractor::new()?.extract_metadata(url).await
}

/// Cleans HTML read from disk or stdin, with `url` as both request URL and base.
pub fn clean_html(html: &str, url: &str) -> Result<CleanedArticle> {
    let base = parse_page_url(url)?;
    let config = ExtractorConfig::builder().debug_html_path(None).build();
    Extractor::with_config(config)?.clean_html(html, url, &base)
}
