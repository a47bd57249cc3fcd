//! Image normalization: responsive `<picture>` collapse and absolute `src`.
//!
//! Two passes run over the live document. The first replaces every
//! `<picture>` holding an `<img>` with that image, pointed at the widest
//! `srcset` candidate offered by its `<source>` children. The second strips
//! lazy-loading and responsive attributes from every remaining `<img>` and
//! makes its `src` absolute.

use dom_query::{Document, Selection};
use url::Url;

use crate::resolve::resolve_url;

/// Attributes dropped from the fallback image of a collapsed `<picture>`.
const PICTURE_IMG_HINTS: &[&str] = &["loading", "decoding"];

/// Attributes dropped from every standalone `<img>`.
const IMG_HINTS: &[&str] = &["loading", "decoding", "srcset"];

/// Runs both image passes over `doc`.
pub fn rewrite_images(doc: &Document, base: &Url) {
    collapse_pictures(doc, base);
    normalize_img_sources(doc, base);
}

/// Replaces each `<picture>` with its fallback `<img>`.
///
/// Pictures without an `<img>` are left untouched. When no candidate
/// descriptor parses, the fallback keeps its original `src`.
pub fn collapse_pictures(doc: &Document, base: &Url) {
    let pictures = doc.select("picture");
    let mut picture_count = 0;

    for node in pictures.nodes() {
        let picture = Selection::from(*node);
        picture_count += 1;

        let img = picture.select("img").first();
        if !img.exists() {
            continue;
        }

        if let Some(source) = widest_source(&picture) {
            let source = source.replacen("webp", "png", 1);
            let resolved = resolve_url(&source, base);
            img.set_attr("src", &resolved);
            tracing::debug!(new_src = %resolved, "Updated picture element source");
        }

        for attr in PICTURE_IMG_HINTS {
            img.remove_attr(attr);
        }

        let img_html = img.html();
        picture.replace_with_html(img_html);
    }

    if picture_count > 0 {
        tracing::debug!(count = picture_count, "Processed picture elements");
    }
}

/// Strips loading hints from every `<img>` and resolves its `src`.
pub fn normalize_img_sources(doc: &Document, base: &Url) {
    let images = doc.select("img");
    let mut img_count = 0;

    for img in images.iter() {
        img_count += 1;

        for attr in IMG_HINTS {
            img.remove_attr(attr);
        }

        if let Some(src) = img.attr("src") {
            let resolved = resolve_url(&src, base);
            if resolved != *src {
                img.set_attr("src", &resolved);
                tracing::debug!(original = %src, new = %resolved, "Updated img src");
            }
        }
    }

    if img_count > 0 {
        tracing::debug!(count = img_count, "Processed img elements");
    }
}

/// Widest candidate across every `<source srcset>` of a picture.
fn widest_source(picture: &Selection) -> Option<String> {
    let mut best: Option<(String, u32)> = None;

    for source in picture.select("source").iter() {
        let Some(srcset) = source.attr("srcset") else {
            continue;
        };

        if let Some((url, width)) = widest_candidate(&srcset)
            && best.as_ref().is_none_or(|(_, max)| width > *max)
        {
            best = Some((url, width));
        }
    }

    best.map(|(url, _)| url)
}

/// Picks the candidate with the largest `w` descriptor from a descriptor list.
///
/// Entries that are not exactly `url width` or whose width does not parse
/// are skipped. Ties keep the earliest candidate; a zero width never wins.
///
/// # Example
///
/// ```rust
/// use page_zen_core::images::widest_candidate;
///
/// let picked = widest_candidate("a.jpg 400w, b.jpg 1200w, c.jpg 800w");
/// assert_eq!(picked, Some(("b.jpg".to_string(), 1200)));
/// ```
pub fn widest_candidate(srcset: &str) -> Option<(String, u32)> {
    let mut best: Option<(String, u32)> = None;

    for candidate in srcset.split(',') {
        let parts: Vec<&str> = candidate.split_whitespace().collect();
        let [url, descriptor] = parts.as_slice() else {
            continue;
        };

        let width_str = descriptor.strip_suffix('w').unwrap_or(descriptor);
        let width = match width_str.parse::<u32>() {
            Ok(w) => w,
            Err(e) => {
                tracing::debug!(width_string = %width_str, error = %e, "Failed to parse width from srcset");
                continue;
            }
        };

        let current_max = best.as_ref().map_or(0, |(_, w)| *w);
        if width > current_max {
            best = Some((url.to_string(), width));
        }
    }

    best
}
