//! Cleaning rule tables: structural removal rules and boilerplate text patterns.
//!
//! Both tables are plain values. The defaults reproduce the catalogue the
//! service ships with; custom tables can be built from selector strings or
//! regex sources and injected into an [`Extractor`](crate::Extractor).

use std::fmt;
use std::str::FromStr;

use dom_query::Selection;
use regex::{Regex, RegexBuilder};

use crate::{PageZenError, Result};

/// Default removal catalogue, in application order.
pub const DEFAULT_REMOVAL_SELECTORS: &[&str] = &[
    // scripts and styles
    "script",
    "style",
    "noscript",
    // navigation chrome
    "nav",
    "header",
    "footer",
    ".navigation",
    ".nav",
    ".menu",
    // ads and social widgets
    ".ad",
    ".ads",
    ".advertisement",
    ".social",
    ".share",
    ".sharing",
    ".social-share",
    ".social-media",
    ".twitter",
    ".facebook",
    ".instagram",
    // comments and related content
    ".comments",
    ".comment",
    ".related",
    ".recommended",
    ".suggestions",
    // tracking
    ".analytics",
    ".tracking",
    ".pixel",
    // consent banners and popups
    ".cookie",
    ".gdpr",
    ".popup",
    ".modal",
    ".overlay",
    // newsletter boxes
    ".subscribe",
    ".newsletter",
    ".signup",
    ".email-signup",
    // breadcrumbs and taxonomy
    ".breadcrumb",
    ".breadcrumbs",
    ".tags",
    ".categories",
    // embedded players
    ".video-player",
    ".embed",
    "iframe[src*='youtube']",
    "iframe[src*='vimeo']",
    // sidebars and widgets
    "[class*='sidebar']",
    "[class*='widget']",
    "[id*='sidebar']",
    "[id*='widget']",
    // subscription and contact forms
    "form:not(.search-form)",
];

/// Default boilerplate phrases, matched case-insensitively.
pub const DEFAULT_BOILERPLATE_PATTERNS: &[&str] = &[
    r"subscribe\s+to\s+our\s+newsletter",
    r"follow\s+us\s+on",
    r"share\s+this\s+article",
    r"related\s+articles?",
    r"you\s+might\s+also\s+like",
    r"recommended\s+for\s+you",
    r"advertisement",
    r"sponsored\s+content",
];

/// A single structural removal rule.
///
/// Rules are written and displayed in a small CSS subset:
///
/// | form | variant |
/// |---|---|
/// | `nav` | [`RemovalRule::Tag`] |
/// | `.ad` | [`RemovalRule::Class`] |
/// | `[class*='sidebar']` | [`RemovalRule::AttrContains`] |
/// | `iframe[src*='youtube']` | [`RemovalRule::TagAttrContains`] |
/// | `form:not(.search-form)` | [`RemovalRule::TagExceptClass`] |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalRule {
    /// Tag-name equality.
    Tag(String),
    /// Class-token containment.
    Class(String),
    /// Attribute value contains a substring.
    AttrContains { attr: String, needle: String },
    /// Tag-name equality plus attribute substring.
    TagAttrContains { tag: String, attr: String, needle: String },
    /// Tag-name equality unless the element carries the excepted class.
    TagExceptClass { tag: String, class: String },
}

impl RemovalRule {
    /// Tests a single element against this rule.
    pub fn matches(&self, element: &Selection) -> bool {
        let Some(tag) = element.nodes().first().and_then(|n| n.node_name()) else {
            return false;
        };
        let tag = tag.to_ascii_lowercase();

        match self {
            Self::Tag(name) => tag == *name,
            Self::Class(class) => has_class(element, class),
            Self::AttrContains { attr, needle } => attr_contains(element, attr, needle),
            Self::TagAttrContains { tag: name, attr, needle } => tag == *name && attr_contains(element, attr, needle),
            Self::TagExceptClass { tag: name, class } => tag == *name && !has_class(element, class),
        }
    }
}

fn has_class(element: &Selection, class: &str) -> bool {
    element
        .attr("class")
        .is_some_and(|value| value.split_whitespace().any(|token| token == class))
}

fn attr_contains(element: &Selection, attr: &str, needle: &str) -> bool {
    element.attr(attr).is_some_and(|value| value.contains(needle))
}

impl fmt::Display for RemovalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => write!(f, "{}", tag),
            Self::Class(class) => write!(f, ".{}", class),
            Self::AttrContains { attr, needle } => write!(f, "[{}*='{}']", attr, needle),
            Self::TagAttrContains { tag, attr, needle } => write!(f, "{}[{}*='{}']", tag, attr, needle),
            Self::TagExceptClass { tag, class } => write!(f, "{}:not(.{})", tag, class),
        }
    }
}

impl FromStr for RemovalRule {
    type Err = PageZenError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || PageZenError::InvalidRule(s.to_string());

        if let Some(class) = s.strip_prefix('.') {
            return if is_name(class) { Ok(Self::Class(class.to_string())) } else { Err(invalid()) };
        }

        if let Some((tag, rest)) = s.split_once(":not(.") {
            let class = rest.strip_suffix(')').ok_or_else(invalid)?;
            if !is_name(tag) || !is_name(class) {
                return Err(invalid());
            }
            return Ok(Self::TagExceptClass { tag: tag.to_ascii_lowercase(), class: class.to_string() });
        }

        if let Some((tag, rest)) = s.split_once('[') {
            let body = rest.strip_suffix(']').ok_or_else(invalid)?;
            let (attr, value) = body.split_once("*=").ok_or_else(invalid)?;
            let needle = value
                .trim()
                .strip_prefix('\'')
                .and_then(|v| v.strip_suffix('\''))
                .or_else(|| value.trim().strip_prefix('"').and_then(|v| v.strip_suffix('"')))
                .ok_or_else(invalid)?;
            let attr = attr.trim();
            if !is_name(attr) || needle.is_empty() {
                return Err(invalid());
            }

            return if tag.is_empty() {
                Ok(Self::AttrContains { attr: attr.to_string(), needle: needle.to_string() })
            } else if is_name(tag) {
                Ok(Self::TagAttrContains {
                    tag: tag.to_ascii_lowercase(),
                    attr: attr.to_string(),
                    needle: needle.to_string(),
                })
            } else {
                Err(invalid())
            };
        }

        if is_name(s) { Ok(Self::Tag(s.to_ascii_lowercase())) } else { Err(invalid()) }
    }
}

fn is_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Ordered removal catalogue applied by [`prune`](crate::prune::prune).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalRuleSet {
    rules: Vec<RemovalRule>,
}

impl RemovalRuleSet {
    /// Builds a rule set from already-constructed rules.
    pub fn new(rules: Vec<RemovalRule>) -> Self {
        Self { rules }
    }

    /// Parses each selector into a rule, failing on the first invalid one.
    ///
    /// # Example
    ///
    /// ```rust
    /// use page_zen_core::RemovalRuleSet;
    ///
    /// let rules = RemovalRuleSet::from_selectors(&[".promo", "aside"]).unwrap();
    /// assert_eq!(rules.len(), 2);
    /// ```
    pub fn from_selectors<S: AsRef<str>>(selectors: &[S]) -> Result<Self> {
        let rules = selectors.iter().map(|s| s.as_ref().parse()).collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[RemovalRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RemovalRuleSet {
    fn default() -> Self {
        let rules = DEFAULT_REMOVAL_SELECTORS.iter().filter_map(|s| s.parse().ok()).collect();
        Self { rules }
    }
}

/// Case-insensitive filler phrases stripped from extracted text.
#[derive(Debug, Clone)]
pub struct BoilerplatePatterns {
    patterns: Vec<Regex>,
}

impl BoilerplatePatterns {
    /// Compiles each source as a case-insensitive regex.
    pub fn new<S: AsRef<str>>(sources: &[S]) -> Result<Self> {
        let patterns = sources
            .iter()
            .map(|source| {
                RegexBuilder::new(source.as_ref())
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| PageZenError::InvalidRule(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for BoilerplatePatterns {
    fn default() -> Self {
        let patterns = DEFAULT_BOILERPLATE_PATTERNS
            .iter()
            .filter_map(|source| RegexBuilder::new(source).case_insensitive(true).build().ok())
            .collect();
        Self { patterns }
    }
}
