//! Page Zen: fetch a page, strip boilerplate, and return the readable article
//! together with its Open Graph and Twitter Card metadata.
//!
//! The pipeline runs over one mutable [`dom_query::Document`]:
//! social metadata is read first, then boilerplate is pruned, images are
//! rewritten, readability picks the main content, and the text is normalized
//! and optionally rendered to Markdown.
//!
//! # Example
//!
//! ```rust
//! use page_zen_core::clean_html;
//!
//! let paragraph = "<p>The river rose by two metres overnight, flooding the lower streets of the town \
//!     and forcing several families to leave their homes before dawn. Volunteers filled sandbags \
//!     through the morning while the fire service pumped water from the worst affected houses.</p>";
//! let html = format!(
//!     "<html><head><title>Flood Warning</title></head><body><nav>Home</nav><article>{0}{0}{0}</article></body></html>",
//!     paragraph
//! );
//!
//! let article = clean_html(&html, "https://example.com/flood").unwrap();
//! assert!(article.content.contains("sandbags"));
//! assert_eq!(article.length, article.content.chars().count());
//! ```

pub mod article;
pub mod debug;
pub mod error;
pub mod excerpt;
pub mod fetch;
pub mod images;
pub mod markdown;
pub mod normalize;
pub mod opengraph;
pub mod pipeline;
pub mod prune;
pub mod readability;
pub mod resolve;
pub mod rules;

pub use article::CleanedArticle;
pub use error::{PageZenError, Result};
pub use excerpt::{DEFAULT_EXCERPT_LENGTH, excerpt};
pub use fetch::{FetchConfig, FetchedPage, fetch_file, fetch_page, fetch_stdin};
pub use images::rewrite_images;
pub use markdown::{HtmdConverter, HtmlToMarkdown, MarkdownRenderer};
pub use normalize::normalize_text;
pub use opengraph::{SocialMetadata, extract_social_metadata};
pub use pipeline::{Extractor, ExtractorConfig, ExtractorConfigBuilder, clean_html, extract_article, extract_metadata};
pub use prune::{RemovalReport, prune};
pub use readability::{ArticleSummary, summarize};
pub use resolve::{is_absolute_url, resolve_url};
pub use rules::{BoilerplatePatterns, RemovalRule, RemovalRuleSet};
